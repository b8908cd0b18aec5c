//! Little-endian field primitives shared by the stream codecs.
//!
//! Strings are a u16 length followed by UTF-8 bytes. All integers and
//! floats are little-endian.

use std::io::{Read, Write};

use waypost_common::{Error, Result};

/// Read the leading field of a record. `Ok(None)` means the underlying
/// stream hit EOF before the first byte, i.e. a clean record boundary.
pub fn read_record_lead<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<Option<()>> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(Error::Truncated);
        }
        filled += n;
    }
    Ok(Some(()))
}

fn fill<R: Read, const N: usize>(reader: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf).map_err(|err| {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::Truncated
        } else {
            Error::Io(err)
        }
    })?;
    Ok(buf)
}

pub fn read_u8<R: Read>(reader: &mut R) -> Result<u8> {
    Ok(fill::<_, 1>(reader)?[0])
}

pub fn read_u16<R: Read>(reader: &mut R) -> Result<u16> {
    Ok(u16::from_le_bytes(fill(reader)?))
}

pub fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    Ok(u32::from_le_bytes(fill(reader)?))
}

pub fn read_i32<R: Read>(reader: &mut R) -> Result<i32> {
    Ok(i32::from_le_bytes(fill(reader)?))
}

pub fn read_i64<R: Read>(reader: &mut R) -> Result<i64> {
    Ok(i64::from_le_bytes(fill(reader)?))
}

pub fn read_f64<R: Read>(reader: &mut R) -> Result<f64> {
    Ok(f64::from_le_bytes(fill(reader)?))
}

pub fn read_string<R: Read>(reader: &mut R) -> Result<String> {
    let len = read_u16(reader)? as usize;
    let mut buf = vec![0u8; len];
    if len > 0 {
        reader.read_exact(&mut buf).map_err(|err| {
            if err.kind() == std::io::ErrorKind::UnexpectedEof {
                Error::Truncated
            } else {
                Error::Io(err)
            }
        })?;
    }
    String::from_utf8(buf).map_err(|_| Error::InvalidString)
}

pub fn write_u8<W: Write>(writer: &mut W, value: u8) -> Result<()> {
    Ok(writer.write_all(&[value])?)
}

pub fn write_u16<W: Write>(writer: &mut W, value: u16) -> Result<()> {
    Ok(writer.write_all(&value.to_le_bytes())?)
}

pub fn write_u32<W: Write>(writer: &mut W, value: u32) -> Result<()> {
    Ok(writer.write_all(&value.to_le_bytes())?)
}

pub fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<()> {
    Ok(writer.write_all(&value.to_le_bytes())?)
}

pub fn write_i64<W: Write>(writer: &mut W, value: i64) -> Result<()> {
    Ok(writer.write_all(&value.to_le_bytes())?)
}

pub fn write_f64<W: Write>(writer: &mut W, value: f64) -> Result<()> {
    Ok(writer.write_all(&value.to_le_bytes())?)
}

pub fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<()> {
    write_u16(writer, value.len() as u16)?;
    Ok(writer.write_all(value.as_bytes())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_string_round_trip() {
        let mut buf = Vec::new();
        write_string(&mut buf, "Hauptstraße").unwrap();
        let mut cursor = Cursor::new(buf);
        assert_eq!(read_string(&mut cursor).unwrap(), "Hauptstraße");
    }

    #[test]
    fn test_empty_string() {
        let mut buf = Vec::new();
        write_string(&mut buf, "").unwrap();
        assert_eq!(buf, vec![0, 0]);
        let mut cursor = Cursor::new(buf);
        assert_eq!(read_string(&mut cursor).unwrap(), "");
    }

    #[test]
    fn test_record_lead_clean_eof() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        let mut lead = [0u8; 8];
        assert!(read_record_lead(&mut cursor, &mut lead).unwrap().is_none());
    }

    #[test]
    fn test_record_lead_truncated() {
        let mut cursor = Cursor::new(vec![1, 2, 3]);
        let mut lead = [0u8; 8];
        let err = read_record_lead(&mut cursor, &mut lead).unwrap_err();
        assert!(matches!(err, Error::Truncated));
    }

    #[test]
    fn test_truncated_field() {
        let mut cursor = Cursor::new(vec![0xFF, 0xFF]);
        assert!(matches!(read_i64(&mut cursor), Err(Error::Truncated)));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut buf = Vec::new();
        write_u16(&mut buf, 2).unwrap();
        buf.extend_from_slice(&[0xC3, 0x28]);
        let mut cursor = Cursor::new(buf);
        assert!(matches!(read_string(&mut cursor), Err(Error::InvalidString)));
    }
}
