use crate::errors::CoreError;

/// Magic bytes identifying a SWAL (StockWatch Alerts) snapshot.
pub const MAGIC: &[u8; 4] = b"SWAL";

/// Current snapshot format version.
pub const CURRENT_VERSION: u16 = 1;

/// Header size in bytes: magic(4) + version(2) + payload_len(8) = 14
pub const HEADER_SIZE: usize = 14;

/// Header read from snapshot bytes.
#[derive(Debug)]
pub struct SnapshotHeader {
    pub version: u16,
    pub payload_len: u64,
}

/// Write a complete snapshot to bytes.
///
/// Layout:
/// ```text
/// [SWAL: 4B] [version: 2B LE] [payload_len: 8B LE] [payload: variable]
/// ```
pub fn write_snapshot(version: u16, payload: &[u8]) -> Vec<u8> {
    let payload_len = payload.len() as u64;
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());

    // Magic
    buf.extend_from_slice(MAGIC);
    // Version
    buf.extend_from_slice(&version.to_le_bytes());
    // Payload length
    buf.extend_from_slice(&payload_len.to_le_bytes());
    // Payload
    buf.extend_from_slice(payload);

    buf
}

/// Parse the header from raw snapshot bytes.
/// Returns the header and the payload slice.
pub fn read_snapshot(data: &[u8]) -> Result<(SnapshotHeader, &[u8]), CoreError> {
    if data.len() < HEADER_SIZE {
        return Err(CoreError::InvalidFormat(
            "Data too small to be a valid SWAL snapshot".into(),
        ));
    }

    // Validate magic bytes
    if &data[0..4] != MAGIC {
        return Err(CoreError::InvalidFormat(
            "Invalid magic bytes, not a SWAL snapshot".into(),
        ));
    }

    let mut offset = 4;

    // Version
    let version = u16::from_le_bytes([data[offset], data[offset + 1]]);
    offset += 2;

    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    // Payload length
    let payload_len = u64::from_le_bytes(
        data[offset..offset + 8]
            .try_into()
            .map_err(|_| CoreError::InvalidFormat("Failed to read payload length".into()))?,
    );
    offset += 8;

    // A corrupt header can declare any length; bound it in u64 before
    // any cast or slice arithmetic.
    let available = (data.len() - offset) as u64;
    if payload_len > available {
        return Err(CoreError::InvalidFormat(format!(
            "Snapshot truncated: expected {} bytes of payload, got {}",
            payload_len, available
        )));
    }

    let payload = &data[offset..offset + payload_len as usize];

    Ok((
        SnapshotHeader {
            version,
            payload_len,
        },
        payload,
    ))
}
