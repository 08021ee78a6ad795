use crate::error::MapError;
use std::collections::BTreeMap;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

const MAGIC_NUMBER: &[u8] = b"TWMAPPKG";
const HEADER_SIZE: usize = 0x26;

/// Writes `files` (relative `/`-separated name -> content) as a packed map.
///
/// Layout: magic number, then header size, payload offset and payload length
/// as `0x%08x` strings, then a zip archive with the files. Entries are written
/// in name order with a fixed timestamp, so equal input gives equal bytes.
pub fn write_packed(files: &BTreeMap<String, Vec<u8>>, out_path: &Path) -> Result<(), MapError> {
    let mut zip_buf = Vec::new();
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut zip_buf));

    let options = zip::write::FileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644);

    for (name, content) in files {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(content)?;
    }
    zip.finish()?;
    std::mem::drop(zip);

    let file = std::fs::File::create(out_path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(MAGIC_NUMBER)?;
    writer.write_fmt(format_args!(
        "{:#010x}{:#010x}{:#010x}",
        HEADER_SIZE,
        HEADER_SIZE,
        zip_buf.len()
    ))?;
    writer.write_all(&zip_buf)?;
    writer.flush()?;

    log::debug!(
        "wrote {} entries ({} bytes payload) to {}",
        files.len(),
        zip_buf.len(),
        out_path.display()
    );
    Ok(())
}

/// Reads every file entry of a packed map. Directory entries are skipped.
pub fn read_packed(packed_path: &Path) -> Result<BTreeMap<String, Vec<u8>>, MapError> {
    let file = std::fs::File::open(packed_path)?;
    let mut reader = BufReader::new(file);

    let mut header = [0; HEADER_SIZE];
    reader.read_exact(&mut header).map_err(|err| match err.kind() {
        std::io::ErrorKind::UnexpectedEof => MapError::MissingMagicNumber,
        _ => MapError::IO(err),
    })?;

    if !header.starts_with(MAGIC_NUMBER) {
        return Err(MapError::MissingMagicNumber);
    }

    let fields = &header[MAGIC_NUMBER.len()..];
    let header_size = parse_offset(&fields[0..10])?;
    let payload_offset = parse_offset(&fields[10..20])?;
    let payload_len = parse_offset(&fields[20..30])?;
    if header_size != HEADER_SIZE || payload_offset < HEADER_SIZE {
        return Err(MapError::InvalidOffsets);
    }

    reader.seek(std::io::SeekFrom::Start(payload_offset as u64))?;
    let mut content = Vec::new();
    reader
        .by_ref()
        .take(payload_len as u64)
        .read_to_end(&mut content)?;
    if content.len() != payload_len || reader.read(&mut [0u8; 1])? != 0 {
        return Err(MapError::InvalidOffsets);
    }

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(content.as_slice()))?;
    let mut files = BTreeMap::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        // rejects absolute names and `..` escapes
        if entry.enclosed_name().is_none() {
            return Err(MapError::InvalidEntryName(entry.name().to_string()));
        }
        let name = entry.name().to_string();
        let mut buf = Vec::new();
        entry.read_to_end(&mut buf)?;
        files.insert(name, buf);
    }

    Ok(files)
}

fn parse_offset(field: &[u8]) -> Result<usize, MapError> {
    let text = std::str::from_utf8(field).map_err(|_| MapError::InvalidOffsets)?;
    let digits = text.strip_prefix("0x").ok_or(MapError::InvalidOffsets)?;
    usize::from_str_radix(digits, 16).map_err(|_| MapError::InvalidOffsets)
}
