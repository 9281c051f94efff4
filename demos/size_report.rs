use lebcodec::{LebError, SignedLeb128, UnsignedLeb128, MAX_SAFE_INTEGER};

fn sample_safe(count: usize) -> Vec<i64> {
    let mut values = Vec::with_capacity(count);
    let mut state = 0x9e37_79b9_7f4a_7c15u64;
    for _ in 0..count {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        values.push((state % MAX_SAFE_INTEGER as u64) as i64);
    }
    values
}

fn average_bytes(values: &[i64]) -> Result<(f64, f64), LebError> {
    let mut unsigned = 0usize;
    let mut signed = 0usize;
    for &value in values {
        unsigned += UnsignedLeb128::encode(value)?.len();
        signed += SignedLeb128::encode(-value.max(1))?.len();
    }
    let n = values.len() as f64;
    Ok((unsigned as f64 / n, signed as f64 / n))
}

fn main() -> Result<(), LebError> {
    let small: Vec<i64> = (0i64..=255).collect();
    let medium: Vec<i64> = (0i64..=1_000_000).step_by(10_000).collect();
    let large32: Vec<i64> = (0i64..=4_000_000_000).step_by(25_000_000).collect();
    let safe53 = sample_safe(20_000);

    let workloads = [
        ("small", small.as_slice()),
        ("medium", medium.as_slice()),
        ("large32", large32.as_slice()),
        ("safe53", safe53.as_slice()),
    ];

    println!("# Encoded size (average bytes/value)");
    println!();
    println!("The signed column encodes the negation of each value (zero counts as -1).");
    println!();
    println!("| workload | unsigned | signed |");
    println!("|---|---|---|");
    for (name, values) in workloads {
        let (unsigned, signed) = average_bytes(values)?;
        println!("| {name} | {unsigned:.3} | {signed:.3} |");
    }
    Ok(())
}
