use lebcodec::{VarintReader, VarintWriter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let values = [1i64, -5, 9_000, -70_000];
    let mut writer = VarintWriter::new();
    for value in values {
        writer.write(value)?;
    }
    let bytes = writer.into_bytes();

    // The sign of each slot travels out-of-band.
    let mut reader = VarintReader::new(&bytes);
    for value in values {
        let start = reader.position();
        let decoded = reader.read(value < 0)?;
        println!(
            "decoded {decoded} from bytes {start}..{} of the stream",
            reader.position()
        );
    }
    Ok(())
}
