use alvarium_core::Context;
use alvarium_file_read_std::StdFileRead;
use anyhow::Result;
use std::env;

fn main() -> Result<()> {
    let ctx = Context::new().with_file_read(StdFileRead);

    // Get the path from command line arguments or use a default
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "./keys/public.key".to_string());

    match ctx.file_read(&path) {
        Ok(content) => println!("Read {} bytes of key material from {}", content.len(), path),
        Err(e) => {
            eprintln!("Failed to read key: {}", e);
            eprintln!("Make sure the file exists and you have permission to read it.");
        }
    }

    Ok(())
}
