//! Exif tag tables: IFD0/IFD1, Exif sub-IFD, GPS sub-IFD and Interop sub-IFD.

use crate::metadata::{Printer, TypeId};

use super::TagInfo;

/// Tag id of the pointer to the Exif sub-IFD.
pub const EXIF_IFD_POINTER: u16 = 0x8769;

/// Tag id of the pointer to the GPS sub-IFD.
pub const GPS_IFD_POINTER: u16 = 0x8825;

/// Tag id of the pointer to the Interoperability sub-IFD.
pub const IOP_IFD_POINTER: u16 = 0xA005;

const fn tag(id: u16, name: &'static str, type_id: TypeId) -> TagInfo {
    TagInfo::new(id, name, type_id, Printer::None)
}

const fn printed(id: u16, name: &'static str, type_id: TypeId, printer: Printer) -> TagInfo {
    TagInfo::new(id, name, type_id, printer)
}

pub(super) static IMAGE_TAGS: &[TagInfo] = &[
    tag(0x00FE, "NewSubfileType", TypeId::Long),
    tag(0x0100, "ImageWidth", TypeId::Long),
    tag(0x0101, "ImageLength", TypeId::Long),
    tag(0x0102, "BitsPerSample", TypeId::Short),
    tag(0x0103, "Compression", TypeId::Short),
    tag(0x0106, "PhotometricInterpretation", TypeId::Short),
    tag(0x010E, "ImageDescription", TypeId::Ascii),
    tag(0x010F, "Make", TypeId::Ascii),
    tag(0x0110, "Model", TypeId::Ascii),
    tag(0x0111, "StripOffsets", TypeId::Long),
    printed(0x0112, "Orientation", TypeId::Short, Printer::Orientation),
    tag(0x0115, "SamplesPerPixel", TypeId::Short),
    tag(0x0116, "RowsPerStrip", TypeId::Long),
    tag(0x0117, "StripByteCounts", TypeId::Long),
    tag(0x011A, "XResolution", TypeId::Rational),
    tag(0x011B, "YResolution", TypeId::Rational),
    tag(0x011C, "PlanarConfiguration", TypeId::Short),
    printed(0x0128, "ResolutionUnit", TypeId::Short, Printer::ResolutionUnit),
    tag(0x0131, "Software", TypeId::Ascii),
    tag(0x0132, "DateTime", TypeId::Ascii),
    tag(0x013B, "Artist", TypeId::Ascii),
    tag(0x013E, "WhitePoint", TypeId::Rational),
    tag(0x013F, "PrimaryChromaticities", TypeId::Rational),
    tag(0x0142, "TileWidth", TypeId::Long),
    tag(0x0143, "TileLength", TypeId::Long),
    tag(0x0144, "TileOffsets", TypeId::Long),
    tag(0x0145, "TileByteCounts", TypeId::Long),
    tag(0x0201, "JPEGInterchangeFormat", TypeId::Long),
    tag(0x0202, "JPEGInterchangeFormatLength", TypeId::Long),
    tag(0x0211, "YCbCrCoefficients", TypeId::Rational),
    tag(0x0212, "YCbCrSubSampling", TypeId::Short),
    printed(0x0213, "YCbCrPositioning", TypeId::Short, Printer::YCbCrPositioning),
    tag(0x0214, "ReferenceBlackWhite", TypeId::Rational),
    tag(0x8298, "Copyright", TypeId::Ascii),
    tag(EXIF_IFD_POINTER, "ExifTag", TypeId::Long),
    tag(GPS_IFD_POINTER, "GPSTag", TypeId::Long),
];

pub(super) static PHOTO_TAGS: &[TagInfo] = &[
    printed(0x829A, "ExposureTime", TypeId::Rational, Printer::ExposureTime),
    printed(0x829D, "FNumber", TypeId::Rational, Printer::FNumber),
    tag(0x8822, "ExposureProgram", TypeId::Short),
    tag(0x8827, "ISOSpeedRatings", TypeId::Short),
    printed(0x9000, "ExifVersion", TypeId::Undefined, Printer::Version),
    tag(0x9003, "DateTimeOriginal", TypeId::Ascii),
    tag(0x9004, "DateTimeDigitized", TypeId::Ascii),
    tag(0x9101, "ComponentsConfiguration", TypeId::Undefined),
    tag(0x9201, "ShutterSpeedValue", TypeId::SRational),
    tag(0x9202, "ApertureValue", TypeId::Rational),
    tag(0x9204, "ExposureBiasValue", TypeId::SRational),
    tag(0x9205, "MaxApertureValue", TypeId::Rational),
    tag(0x9207, "MeteringMode", TypeId::Short),
    tag(0x9208, "LightSource", TypeId::Short),
    tag(0x9209, "Flash", TypeId::Short),
    printed(0x920A, "FocalLength", TypeId::Rational, Printer::FocalLength),
    tag(0x927C, "MakerNote", TypeId::Undefined),
    tag(0x9286, "UserComment", TypeId::Undefined),
    tag(0x9290, "SubSecTime", TypeId::Ascii),
    tag(0x9291, "SubSecTimeOriginal", TypeId::Ascii),
    tag(0x9292, "SubSecTimeDigitized", TypeId::Ascii),
    printed(0xA000, "FlashpixVersion", TypeId::Undefined, Printer::Version),
    printed(0xA001, "ColorSpace", TypeId::Short, Printer::ColorSpace),
    tag(0xA002, "PixelXDimension", TypeId::Long),
    tag(0xA003, "PixelYDimension", TypeId::Long),
    tag(IOP_IFD_POINTER, "InteroperabilityTag", TypeId::Long),
    tag(0xA402, "ExposureMode", TypeId::Short),
    tag(0xA403, "WhiteBalance", TypeId::Short),
    tag(0xA405, "FocalLengthIn35mmFilm", TypeId::Short),
    tag(0xA406, "SceneCaptureType", TypeId::Short),
    tag(0xA420, "ImageUniqueID", TypeId::Ascii),
    tag(0xA431, "BodySerialNumber", TypeId::Ascii),
    tag(0xA433, "LensMake", TypeId::Ascii),
    tag(0xA434, "LensModel", TypeId::Ascii),
];

pub(super) static GPS_TAGS: &[TagInfo] = &[
    tag(0x0000, "GPSVersionID", TypeId::Byte),
    printed(0x0001, "GPSLatitudeRef", TypeId::Ascii, Printer::LatitudeRef),
    printed(0x0002, "GPSLatitude", TypeId::Rational, Printer::GpsCoordinate),
    printed(0x0003, "GPSLongitudeRef", TypeId::Ascii, Printer::LongitudeRef),
    printed(0x0004, "GPSLongitude", TypeId::Rational, Printer::GpsCoordinate),
    printed(0x0005, "GPSAltitudeRef", TypeId::Byte, Printer::AltitudeRef),
    printed(0x0006, "GPSAltitude", TypeId::Rational, Printer::Altitude),
    printed(0x0007, "GPSTimeStamp", TypeId::Rational, Printer::GpsTimeStamp),
    tag(0x0008, "GPSSatellites", TypeId::Ascii),
    tag(0x0009, "GPSStatus", TypeId::Ascii),
    tag(0x000A, "GPSMeasureMode", TypeId::Ascii),
    tag(0x000B, "GPSDOP", TypeId::Rational),
    tag(0x000C, "GPSSpeedRef", TypeId::Ascii),
    tag(0x000D, "GPSSpeed", TypeId::Rational),
    tag(0x000E, "GPSTrackRef", TypeId::Ascii),
    tag(0x000F, "GPSTrack", TypeId::Rational),
    tag(0x0010, "GPSImgDirectionRef", TypeId::Ascii),
    tag(0x0011, "GPSImgDirection", TypeId::Rational),
    tag(0x0012, "GPSMapDatum", TypeId::Ascii),
    printed(0x0013, "GPSDestLatitudeRef", TypeId::Ascii, Printer::LatitudeRef),
    printed(0x0014, "GPSDestLatitude", TypeId::Rational, Printer::GpsCoordinate),
    printed(0x0015, "GPSDestLongitudeRef", TypeId::Ascii, Printer::LongitudeRef),
    printed(0x0016, "GPSDestLongitude", TypeId::Rational, Printer::GpsCoordinate),
    tag(0x001B, "GPSProcessingMethod", TypeId::Undefined),
    tag(0x001D, "GPSDateStamp", TypeId::Ascii),
    tag(0x001E, "GPSDifferential", TypeId::Short),
];

pub(super) static IOP_TAGS: &[TagInfo] = &[
    tag(0x0001, "InteroperabilityIndex", TypeId::Ascii),
    printed(0x0002, "InteroperabilityVersion", TypeId::Undefined, Printer::Version),
    tag(0x1000, "RelatedImageFileFormat", TypeId::Ascii),
    tag(0x1001, "RelatedImageWidth", TypeId::Long),
    tag(0x1002, "RelatedImageLength", TypeId::Long),
];
