//! Test utilities for integration tests.
//!
//! Byte-level builders for the containers the decoder reads: Exif TIFF
//! blocks with nested directories, JPEG/EXV segment streams, Photoshop IPTC
//! resources and XMP packets. Nothing here depends on the crate's own
//! encoders, so the decoder is checked against independently built bytes.

use std::io::Write;

use tempfile::NamedTempFile;

// =============================================================================
// TIFF Constants
// =============================================================================

pub const TYPE_BYTE: u16 = 1;
pub const TYPE_ASCII: u16 = 2;
pub const TYPE_SHORT: u16 = 3;
pub const TYPE_LONG: u16 = 4;
pub const TYPE_RATIONAL: u16 = 5;
pub const TYPE_UNDEFINED: u16 = 7;

pub const TAG_MAKE: u16 = 0x010F;
pub const TAG_MODEL: u16 = 0x0110;
pub const TAG_ORIENTATION: u16 = 0x0112;
pub const TAG_EXIF_IFD: u16 = 0x8769;
pub const TAG_GPS_IFD: u16 = 0x8825;
pub const TAG_EXPOSURE_TIME: u16 = 0x829A;
pub const TAG_EXIF_VERSION: u16 = 0x9000;
pub const TAG_MAKER_NOTE: u16 = 0x927C;

pub const TAG_GPS_VERSION: u16 = 0x0000;
pub const TAG_GPS_LATITUDE_REF: u16 = 0x0001;
pub const TAG_GPS_LATITUDE: u16 = 0x0002;
pub const TAG_GPS_LONGITUDE_REF: u16 = 0x0003;
pub const TAG_GPS_LONGITUDE: u16 = 0x0004;

// =============================================================================
// TIFF Builders
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrderType {
    LittleEndian,
    BigEndian,
}

impl ByteOrderType {
    fn u16(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }

    fn u32(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }
}

#[derive(Clone, Debug)]
enum EntryValue {
    /// Encoded value bytes, placed inline or after the directory
    Data(Vec<u8>),
    /// Offset of another directory of the same builder
    Directory(usize),
    /// Raw 4 byte value field, written as-is
    Field(u32),
}

/// One IFD entry.
#[derive(Clone, Debug)]
pub struct EntryBuilder {
    tag: u16,
    type_code: u16,
    count: u32,
    value: EntryValue,
}

impl EntryBuilder {
    /// NUL-terminated ASCII value; count includes the NUL.
    pub fn ascii(tag: u16, text: &str) -> Self {
        let mut data = text.as_bytes().to_vec();
        data.push(0);
        Self {
            tag,
            type_code: TYPE_ASCII,
            count: data.len() as u32,
            value: EntryValue::Data(data),
        }
    }

    pub fn short(tag: u16, value: u16) -> Self {
        Self::shorts(tag, &[value])
    }

    pub fn shorts(tag: u16, values: &[u16]) -> Self {
        Self {
            tag,
            type_code: TYPE_SHORT,
            count: values.len() as u32,
            value: EntryValue::Data(values.iter().flat_map(|v| v.to_be_bytes()).collect()),
        }
    }

    pub fn rationals(tag: u16, values: &[(u32, u32)]) -> Self {
        Self {
            tag,
            type_code: TYPE_RATIONAL,
            count: values.len() as u32,
            value: EntryValue::Data(
                values
                    .iter()
                    .flat_map(|(n, d)| [n.to_be_bytes(), d.to_be_bytes()])
                    .flatten()
                    .collect(),
            ),
        }
    }

    pub fn bytes(tag: u16, type_code: u16, data: &[u8]) -> Self {
        Self {
            tag,
            type_code,
            count: data.len() as u32,
            value: EntryValue::Data(data.to_vec()),
        }
    }

    /// LONG pointer to directory `index` of the builder.
    pub fn pointer(tag: u16, index: usize) -> Self {
        Self {
            tag,
            type_code: TYPE_LONG,
            count: 1,
            value: EntryValue::Directory(index),
        }
    }

    /// Entry with a hand-picked count and value field, for corrupt input.
    pub fn raw(tag: u16, type_code: u16, count: u32, field: u32) -> Self {
        Self {
            tag,
            type_code,
            count,
            value: EntryValue::Field(field),
        }
    }
}

/// One directory: entries plus an optional next-IFD link.
#[derive(Clone, Debug, Default)]
pub struct IfdBuilder {
    entries: Vec<EntryBuilder>,
    next: Option<usize>,
}

impl IfdBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, entry: EntryBuilder) -> Self {
        self.entries.push(entry);
        self
    }

    /// Link to directory `index` as the next IFD.
    pub fn next(mut self, index: usize) -> Self {
        self.next = Some(index);
        self
    }

    fn size(&self) -> usize {
        let external: usize = self
            .entries
            .iter()
            .map(|e| match &e.value {
                EntryValue::Data(data) if data.len() > 4 => data.len() + data.len() % 2,
                _ => 0,
            })
            .sum();
        2 + self.entries.len() * 12 + 4 + external
    }
}

/// Builder for Exif TIFF blocks. Directory 0 is IFD0.
///
/// Multi-byte values inside entries are given big-endian by the entry
/// constructors and converted when the block is little-endian.
pub struct TiffBuilder {
    byte_order: ByteOrderType,
    ifds: Vec<IfdBuilder>,
}

impl TiffBuilder {
    pub fn new() -> Self {
        Self {
            byte_order: ByteOrderType::BigEndian,
            ifds: Vec::new(),
        }
    }

    pub fn with_byte_order(mut self, order: ByteOrderType) -> Self {
        self.byte_order = order;
        self
    }

    pub fn add_ifd(mut self, ifd: IfdBuilder) -> Self {
        self.ifds.push(ifd);
        self
    }

    /// Build the TIFF block.
    pub fn build(self) -> Vec<u8> {
        let order = self.byte_order;

        // Directories are laid out back to back after the header
        let mut offsets = Vec::with_capacity(self.ifds.len());
        let mut offset = 8;
        for ifd in &self.ifds {
            offsets.push(offset);
            offset += ifd.size();
        }

        let mut data = Vec::with_capacity(offset);
        data.extend_from_slice(match order {
            ByteOrderType::LittleEndian => b"II",
            ByteOrderType::BigEndian => b"MM",
        });
        data.extend_from_slice(&order.u16(42));
        data.extend_from_slice(&order.u32(8));

        for (index, ifd) in self.ifds.iter().enumerate() {
            let table_end = offsets[index] + 2 + ifd.entries.len() * 12 + 4;
            let mut external = Vec::new();

            data.extend_from_slice(&order.u16(ifd.entries.len() as u16));
            for entry in &ifd.entries {
                data.extend_from_slice(&order.u16(entry.tag));
                data.extend_from_slice(&order.u16(entry.type_code));
                data.extend_from_slice(&order.u32(entry.count));

                match &entry.value {
                    EntryValue::Data(raw) => {
                        let value = swap_elements(raw, entry.type_code, order);
                        if value.len() <= 4 {
                            let mut field = value.clone();
                            field.resize(4, 0);
                            data.extend_from_slice(&field);
                        } else {
                            let at = table_end + external.len();
                            data.extend_from_slice(&order.u32(at as u32));
                            external.extend_from_slice(&value);
                            if value.len() % 2 == 1 {
                                external.push(0);
                            }
                        }
                    }
                    EntryValue::Directory(child) => {
                        data.extend_from_slice(&order.u32(offsets[*child] as u32));
                    }
                    EntryValue::Field(field) => {
                        data.extend_from_slice(&order.u32(*field));
                    }
                }
            }

            let next = ifd.next.map_or(0, |n| offsets[n] as u32);
            data.extend_from_slice(&order.u32(next));
            data.extend_from_slice(&external);
        }

        data
    }
}

impl Default for TiffBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert big-endian element bytes to `order`.
fn swap_elements(raw: &[u8], type_code: u16, order: ByteOrderType) -> Vec<u8> {
    let width = match type_code {
        3 | 8 => 2,
        4 | 9 | 5 | 10 | 11 => 4,
        12 => 8,
        _ => 1,
    };
    if order == ByteOrderType::BigEndian || width == 1 {
        return raw.to_vec();
    }
    raw.chunks(width)
        .flat_map(|chunk| chunk.iter().rev().copied().collect::<Vec<_>>())
        .collect()
}

// =============================================================================
// Segment Builders
// =============================================================================

/// One JPEG marker segment with its length field.
pub fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, marker];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// APP1 segment carrying an Exif TIFF block.
pub fn exif_segment(tiff: &[u8]) -> Vec<u8> {
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(tiff);
    segment(0xE1, &payload)
}

/// APP1 segment carrying an XMP packet.
pub fn xmp_segment(packet: &str) -> Vec<u8> {
    let mut payload = b"http://ns.adobe.com/xap/1.0/\0".to_vec();
    payload.extend_from_slice(packet.as_bytes());
    segment(0xE1, &payload)
}

/// APP13 segment carrying one IPTC image resource.
pub fn iptc_segment(iim: &[u8]) -> Vec<u8> {
    let mut payload = b"Photoshop 3.0\0".to_vec();
    payload.extend_from_slice(b"8BIM");
    payload.extend_from_slice(&0x0404u16.to_be_bytes());
    payload.extend_from_slice(&[0, 0]);
    payload.extend_from_slice(&(iim.len() as u32).to_be_bytes());
    payload.extend_from_slice(iim);
    if iim.len() % 2 == 1 {
        payload.push(0);
    }
    segment(0xED, &payload)
}

/// One IIM dataset.
pub fn iim_dataset(record: u8, number: u8, data: &[u8]) -> Vec<u8> {
    let mut out = vec![0x1C, record, number];
    out.extend_from_slice(&(data.len() as u16).to_be_bytes());
    out.extend_from_slice(data);
    out
}

/// XMP packet around the given `rdf:Description` elements.
pub fn xmp_packet(descriptions: &str) -> String {
    format!(
        concat!(
            "<?xpacket begin=\"\u{feff}\" id=\"W5M0MpCehiHzreSzNTczkc9d\"?>\n",
            "<x:xmpmeta xmlns:x=\"adobe:ns:meta/\">\n",
            " <rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">\n",
            "{}\n",
            " </rdf:RDF>\n",
            "</x:xmpmeta>\n",
            "<?xpacket end=\"w\"?>"
        ),
        descriptions
    )
}

/// JPEG stream: SOI, segments, a short scan, EOI.
pub fn jpeg(segments: &[Vec<u8>]) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    out.extend_from_slice(&segment(0xE0, b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0"));
    for s in segments {
        out.extend_from_slice(s);
    }
    out.extend_from_slice(&segment(0xDA, &[0x01, 0x01, 0x00, 0x00, 0x3F, 0x00]));
    out.extend_from_slice(&[0x12, 0x34, 0x56, 0x78]);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

/// Exiv2 sidecar: signature, segments, EOI.
pub fn exv(segments: &[Vec<u8>]) -> Vec<u8> {
    let mut out = b"\xFF\x01Exiv2".to_vec();
    for s in segments {
        out.extend_from_slice(s);
    }
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

// =============================================================================
// Sample Files
// =============================================================================

/// Exif block with camera, photo and GPS directories.
///
/// GPS position is 52 deg 3' 49.02" North, 1 deg 13' 49.16" East.
pub fn create_gps_tiff(order: ByteOrderType) -> Vec<u8> {
    TiffBuilder::new()
        .with_byte_order(order)
        .add_ifd(
            IfdBuilder::new()
                .entry(EntryBuilder::ascii(TAG_MAKE, "Canon"))
                .entry(EntryBuilder::ascii(TAG_MODEL, "EOS 5D"))
                .entry(EntryBuilder::short(TAG_ORIENTATION, 1))
                .entry(EntryBuilder::pointer(TAG_EXIF_IFD, 1))
                .entry(EntryBuilder::pointer(TAG_GPS_IFD, 2)),
        )
        .add_ifd(
            IfdBuilder::new()
                .entry(EntryBuilder::rationals(TAG_EXPOSURE_TIME, &[(1, 250)]))
                .entry(EntryBuilder::bytes(TAG_EXIF_VERSION, TYPE_UNDEFINED, b"0230")),
        )
        .add_ifd(
            IfdBuilder::new()
                .entry(EntryBuilder::bytes(TAG_GPS_VERSION, TYPE_BYTE, &[2, 2, 0, 0]))
                .entry(EntryBuilder::ascii(TAG_GPS_LATITUDE_REF, "N"))
                .entry(EntryBuilder::rationals(
                    TAG_GPS_LATITUDE,
                    &[(52, 1), (3, 1), (4902, 100)],
                ))
                .entry(EntryBuilder::ascii(TAG_GPS_LONGITUDE_REF, "E"))
                .entry(EntryBuilder::rationals(
                    TAG_GPS_LONGITUDE,
                    &[(1, 1), (13, 1), (4916, 100)],
                )),
        )
        .build()
}

/// JPEG with the GPS Exif block, an IPTC caption and an XMP packet.
pub fn create_gps_jpeg() -> Vec<u8> {
    let iim = [
        iim_dataset(2, 0, &[0, 4]),
        iim_dataset(2, 120, b"Harbour at dusk"),
        iim_dataset(2, 55, b"20230115"),
    ]
    .concat();
    let packet = xmp_packet(
        r#"  <rdf:Description rdf:about="" xmlns:xmp="http://ns.adobe.com/xap/1.0/" xmp:Rating="4"/>"#,
    );

    jpeg(&[
        exif_segment(&create_gps_tiff(ByteOrderType::BigEndian)),
        iptc_segment(&iim),
        xmp_segment(&packet),
    ])
}

/// Keys of `create_gps_jpeg` in decode order.
pub const GPS_JPEG_KEYS: &[&str] = &[
    "Exif.Image.Make",
    "Exif.Image.Model",
    "Exif.Image.Orientation",
    "Exif.Image.ExifTag",
    "Exif.Image.GPSTag",
    "Exif.Photo.ExposureTime",
    "Exif.Photo.ExifVersion",
    "Exif.GPSInfo.GPSVersionID",
    "Exif.GPSInfo.GPSLatitudeRef",
    "Exif.GPSInfo.GPSLatitude",
    "Exif.GPSInfo.GPSLongitudeRef",
    "Exif.GPSInfo.GPSLongitude",
    "Iptc.Application2.RecordVersion",
    "Iptc.Application2.Caption",
    "Iptc.Application2.DateCreated",
    "Xmp.xmp.Rating",
];

// =============================================================================
// Files
// =============================================================================

/// Write `data` to a temporary file that lives as long as the handle.
pub fn write_temp(data: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(data).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
