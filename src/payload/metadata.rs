use crate::amf::Amf0Value;
use crate::payload::{SoundFormat, VideoCodec};
use crate::{Error, Result};

const ON_METADATA: &str = "onMetaData";

/// Stream properties carried by an `onMetaData` script tag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    // Video properties
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub video_codec: Option<VideoCodec>,
    pub video_data_rate: Option<f64>,
    pub framerate: Option<f64>,

    // Audio properties
    pub audio_codec: Option<SoundFormat>,
    pub audio_data_rate: Option<f64>,
    pub audio_sample_rate: Option<f64>,
    pub audio_sample_size: Option<f64>,
    pub stereo: Option<bool>,

    // File properties
    pub duration: Option<f64>,
    pub file_size: Option<f64>,
    pub encoder: Option<String>,
}

impl Metadata {
    /// Find `onMetaData` followed by its property object in decoded script values
    pub fn from_values(values: &[Amf0Value]) -> Result<Self> {
        let properties = values
            .windows(2)
            .find(|pair| pair[0].as_string() == Some(ON_METADATA))
            .map(|pair| &pair[1])
            .filter(|obj| obj.as_object().is_some())
            .ok_or_else(|| Error::amf_decode("no onMetaData object in script data"))?;

        let number = |key: &str| properties.get_property(key).and_then(|v| v.as_number());
        let code = |key: &str| {
            number(key)
                .filter(|n| n.fract() == 0.0 && (0.0..16.0).contains(n))
                .map(|n| n as u8)
        };

        Ok(Metadata {
            width: number("width"),
            height: number("height"),
            video_codec: code("videocodecid").map(VideoCodec::from_codec_id),
            video_data_rate: number("videodatarate"),
            framerate: number("framerate"),

            audio_codec: code("audiocodecid").map(SoundFormat::from_bits),
            audio_data_rate: number("audiodatarate"),
            audio_sample_rate: number("audiosamplerate"),
            audio_sample_size: number("audiosamplesize"),
            stereo: properties.get_property("stereo").and_then(|v| v.as_boolean()),

            duration: number("duration"),
            file_size: number("filesize"),
            encoder: properties
                .get_property("encoder")
                .and_then(|v| v.as_string())
                .map(String::from),
        })
    }

    /// Check if has video
    pub fn has_video(&self) -> bool {
        self.video_codec.is_some() || self.width.is_some()
    }

    /// Check if has audio
    pub fn has_audio(&self) -> bool {
        self.audio_codec.is_some() || self.audio_sample_rate.is_some()
    }

    /// Get video resolution
    pub fn resolution(&self) -> Option<(u32, u32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some((w as u32, h as u32)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_metadata(properties: Vec<(&str, Amf0Value)>) -> Vec<Amf0Value> {
        vec![
            Amf0Value::String(ON_METADATA.to_string()),
            Amf0Value::EcmaArray(
                properties
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            ),
        ]
    }

    #[test]
    fn test_extracts_fields() {
        let values = on_metadata(vec![
            ("duration", Amf0Value::Number(30.0)),
            ("width", Amf0Value::Number(1280.0)),
            ("height", Amf0Value::Number(720.0)),
            ("videocodecid", Amf0Value::Number(7.0)),
            ("audiocodecid", Amf0Value::Number(10.0)),
            ("stereo", Amf0Value::Boolean(true)),
            ("encoder", Amf0Value::String("Lavf58".to_string())),
        ]);

        let metadata = Metadata::from_values(&values).unwrap();
        assert_eq!(metadata.duration, Some(30.0));
        assert_eq!(metadata.resolution(), Some((1280, 720)));
        assert_eq!(metadata.video_codec, Some(VideoCodec::Avc));
        assert_eq!(metadata.audio_codec, Some(SoundFormat::Aac));
        assert_eq!(metadata.stereo, Some(true));
        assert_eq!(metadata.encoder.as_deref(), Some("Lavf58"));
        assert!(metadata.has_video());
        assert!(metadata.has_audio());
    }

    #[test]
    fn test_out_of_range_codec_id_is_ignored() {
        let values = on_metadata(vec![("videocodecid", Amf0Value::Number(99.0))]);
        let metadata = Metadata::from_values(&values).unwrap();
        assert!(metadata.video_codec.is_none());
        assert!(!metadata.has_video());
    }

    #[test]
    fn test_fractional_codec_id_is_ignored() {
        let values = on_metadata(vec![
            ("videocodecid", Amf0Value::Number(7.5)),
            ("audiocodecid", Amf0Value::Number(10.25)),
        ]);
        let metadata = Metadata::from_values(&values).unwrap();
        assert!(metadata.video_codec.is_none());
        assert!(metadata.audio_codec.is_none());
    }

    #[test]
    fn test_missing_on_metadata() {
        let values = vec![Amf0Value::String("onCuePoint".to_string()), Amf0Value::Null];
        assert!(matches!(Metadata::from_values(&values), Err(Error::AmfDecode(_))));
        assert!(Metadata::from_values(&[]).is_err());
    }
}
