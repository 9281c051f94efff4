use lebcodec::Leb128;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    for value in [42i64, -42] {
        let encoded = Leb128::encode(value)?;
        let decoded = Leb128::decode(&encoded, 0, value < 0)?;
        println!("{value} -> {:02x?} -> {decoded}", encoded);
    }
    Ok(())
}
