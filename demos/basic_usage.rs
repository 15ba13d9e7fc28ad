//! Basic usage example for bitwire
//!
//! Run with: cargo run --example basic_usage

use bitwire::{BitReader, ByteBuffer, Endian, Error, FloatFormat, IntFormat};

fn main() -> Result<(), Error> {
    println!("bitwire Basic Usage Example");
    println!("===========================");

    // Example 1: Fixed-width integers in both byte orders
    println!("\n1. Integers:");
    {
        let mut buf = ByteBuffer::new();
        buf.write_u16(0x1234, Endian::Big)?;
        buf.write_u16(0x1234, Endian::Little)?;
        buf.write_i32(-2, Endian::Big)?;

        println!("  Encoded {} bytes: {}", buf.len(), buf.to_hex());
        println!(
            "  Decoded: be={:#06x}, le={:#06x}, i32={}",
            buf.read_u16(Endian::Big)?,
            buf.read_u16(Endian::Little)?,
            buf.read_i32(Endian::Big)?
        );
    }

    // Example 2: Range validation leaves the buffer untouched
    println!("\n2. Range Validation:");
    {
        let mut buf = ByteBuffer::from(vec![0xAA, 0xBB]);
        match buf.write_int(256, IntFormat::U8, Some(0)) {
            Ok(_) => println!("  unexpected success"),
            Err(err) => println!("  Rejected: {}", err),
        }
        println!("  Buffer still: {}", buf.to_hex());
    }

    // Example 3: Floats, including half precision
    println!("\n3. Floats:");
    {
        let mut buf = ByteBuffer::new();
        let half = buf.write_f16(0.1, Endian::Big)?;
        let single = buf.write_f32(1.5, Endian::Little)?;
        let double = buf.write_float(core::f64::consts::PI, FloatFormat::DOUBLE, None)?;

        println!("  Encoded {} bytes: {}", buf.len(), buf.to_hex());
        println!("  f16 0.1 -> {}", buf.read_f16_at(half, Endian::Big)?);
        println!("  f32 1.5 -> {}", buf.read_f32_at(single, Endian::Little)?);
        println!(
            "  f64 pi  -> {}",
            buf.read_float(Some(double), FloatFormat::DOUBLE)?
        );
    }

    // Example 4: Offset writes and structural edits
    println!("\n4. Offsets and Edits:");
    {
        let mut buf = ByteBuffer::new();
        buf.write_u8_at(4, 0xFF)?;
        println!("  Gap zero-filled: {}", buf.to_hex());

        buf.insert(1, &[0x11, 0x22]).delete(4, 2);
        println!("  After insert/delete: {}", buf.to_hex());
    }

    // Example 5: Exponential-Golomb codes
    println!("\n5. Exp-Golomb Decoding:");
    {
        // 1 | 010 | 011 | 00100 | 00101
        let data = [0b1010_0110, 0b0100_0010, 0b1000_0000];
        let mut reader = BitReader::new(&data);

        let unsigned: Vec<u32> = (0..3)
            .map(|_| reader.read_exp_golomb())
            .collect::<Result<_, _>>()?;
        let signed = [reader.read_signed_exp_golomb()?, reader.read_signed_exp_golomb()?];

        println!("  Unsigned: {:?}", unsigned);
        println!("  Signed:   {:?}", signed);
        println!(
            "  Consumed {} of {} bits",
            reader.position(),
            reader.bit_len()
        );
    }

    // Example 6: Truncated stream
    println!("\n6. End of Stream:");
    {
        let mut reader = BitReader::new(&[0x00]);
        match reader.read_exp_golomb() {
            Ok(value) => println!("  unexpected value {}", value),
            Err(err) => println!("  Error: {} (position {})", err, reader.position()),
        }
    }

    println!("\nAll examples completed successfully!");
    Ok(())
}
