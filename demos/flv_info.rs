// FLV Inspection Example
//
// This example demonstrates:
// - Opening an FLV file and validating its header
// - Walking the tag stream until end-of-stream
// - Decoding onMetaData from script data tags
//
// Usage:
//   cargo run --example flv_info -- <file.flv>

use flv::{Payload, Reader, ReaderConfig, Result, ScriptDataMode, UnknownTagPolicy};
use log::{error, info};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: flv_info <file.flv>");
        std::process::exit(2);
    };

    // Real files carry onMetaData as nested AMF0, so decode it structurally
    let config = ReaderConfig::builder()
        .script_data(ScriptDataMode::Deferred)
        .unknown_tags(UnknownTagPolicy::Skip)
        .build()?;

    let mut reader = Reader::open_with_config(&path, config)?;
    print!("{}", reader.header().describe());

    loop {
        match reader.next_tag() {
            Ok(Some(tag)) => {
                print!("{}", tag);
                if let Payload::ScriptData(script) = &tag.payload {
                    match script.metadata() {
                        Ok(metadata) => println!("\t{:?}", metadata),
                        Err(e) => info!("script data without onMetaData: {}", e),
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                error!("stopped at byte {}: {}", reader.position(), e);
                return Err(e);
            }
        }
    }

    info!(
        "{} tags read, {} skipped, {} bytes",
        reader.tags_read(),
        reader.tags_skipped(),
        reader.position()
    );
    Ok(())
}
