//! IPTC-IIM dataset tables for the Envelope (1) and Application (2) records.

use crate::metadata::{Printer, TypeId};

use super::TagInfo;

const fn string(id: u16, name: &'static str) -> TagInfo {
    TagInfo::new(id, name, TypeId::String, Printer::None)
}

const fn short(id: u16, name: &'static str) -> TagInfo {
    TagInfo::new(id, name, TypeId::Short, Printer::None)
}

const fn date(id: u16, name: &'static str) -> TagInfo {
    TagInfo::new(id, name, TypeId::Date, Printer::IptcDate)
}

const fn time(id: u16, name: &'static str) -> TagInfo {
    TagInfo::new(id, name, TypeId::Time, Printer::IptcTime)
}

pub(super) static ENVELOPE_TAGS: &[TagInfo] = &[
    short(0, "ModelVersion"),
    string(5, "Destination"),
    short(20, "FileFormat"),
    short(22, "FileVersion"),
    string(30, "ServiceId"),
    string(40, "EnvelopeNumber"),
    string(50, "ProductId"),
    string(60, "EnvelopePriority"),
    date(70, "DateSent"),
    time(80, "TimeSent"),
    TagInfo::new(90, "CharacterSet", TypeId::Undefined, Printer::None),
    string(100, "UNO"),
];

pub(super) static APPLICATION2_TAGS: &[TagInfo] = &[
    short(0, "RecordVersion"),
    string(5, "ObjectName"),
    string(7, "EditStatus"),
    string(10, "Urgency"),
    string(15, "Category"),
    string(20, "SuppCategory"),
    string(25, "Keywords"),
    string(40, "SpecialInstructions"),
    date(55, "DateCreated"),
    time(60, "TimeCreated"),
    date(62, "DigitizationDate"),
    time(63, "DigitizationTime"),
    string(65, "Program"),
    string(70, "ProgramVersion"),
    string(80, "Byline"),
    string(85, "BylineTitle"),
    string(90, "City"),
    string(92, "SubLocation"),
    string(95, "ProvinceState"),
    string(100, "CountryCode"),
    string(101, "CountryName"),
    string(103, "TransmissionReference"),
    string(105, "Headline"),
    string(110, "Credit"),
    string(115, "Source"),
    string(116, "Copyright"),
    string(118, "Contact"),
    string(120, "Caption"),
    string(122, "Writer"),
];
