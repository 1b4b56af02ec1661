use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, FromRepr, IntoStaticStr};

/// Gameplay variant a difficulty belongs to.
///
/// Parsing accepts both the identifier spelling (`Degree90`) and the spelling
/// used by the published dataset (`90Degree`). Use [`Characteristic::parse_lenient`]
/// when unknown names should degrade to [`Characteristic::Unknown`].
#[derive(
	Debug,
	Clone,
	Copy,
	Default,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	Serialize,
	Deserialize,
	EnumString,
	EnumIter,
	FromRepr,
	IntoStaticStr,
	strum::Display,
)]
#[repr(u8)]
pub enum Characteristic {
	#[default]
	Unknown = 0,
	Standard = 1,
	OneSaber = 2,
	NoArrows = 3,
	Lightshow = 4,
	#[strum(to_string = "Degree90", serialize = "90Degree")]
	#[serde(alias = "90Degree")]
	Degree90 = 5,
	#[strum(to_string = "Degree360", serialize = "360Degree")]
	#[serde(alias = "360Degree")]
	Degree360 = 6,
	Lawless = 7,
}

impl Characteristic {
	/// Every defined variant, in tag order.
	pub const ALL: [Self; 8] = [
		Self::Unknown,
		Self::Standard,
		Self::OneSaber,
		Self::NoArrows,
		Self::Lightshow,
		Self::Degree90,
		Self::Degree360,
		Self::Lawless,
	];

	/// Parses a characteristic name, mapping anything unrecognized to `Unknown`.
	pub fn parse_lenient(name: &str) -> Self {
		name.parse().unwrap_or(Self::Unknown)
	}

	/// Returns the numeric tag.
	#[inline]
	pub fn tag(self) -> u8 {
		self as u8
	}

	/// Returns the identifier spelling.
	pub fn as_str(self) -> &'static str {
		self.into()
	}
}

#[cfg(test)]
mod tests {
	use strum::IntoEnumIterator;

	use super::*;

	#[test]
	fn parses_both_spellings() {
		assert_eq!("90Degree".parse::<Characteristic>().ok(), Some(Characteristic::Degree90));
		assert_eq!("Degree90".parse::<Characteristic>().ok(), Some(Characteristic::Degree90));
		assert_eq!("360Degree".parse::<Characteristic>().ok(), Some(Characteristic::Degree360));
		assert_eq!(Characteristic::parse_lenient("OneSaber"), Characteristic::OneSaber);
	}

	#[test]
	fn unrecognized_name_is_unknown() {
		assert_eq!(Characteristic::parse_lenient("Party"), Characteristic::Unknown);
		assert_eq!(Characteristic::parse_lenient(""), Characteristic::Unknown);
	}

	#[test]
	fn tags_round_trip_through_repr() {
		for ch in Characteristic::iter() {
			assert_eq!(Characteristic::from_repr(ch.tag()), Some(ch));
		}
		assert_eq!(Characteristic::from_repr(8), None);
		assert_eq!(Characteristic::ALL.len(), Characteristic::iter().count());
	}

	#[test]
	fn display_uses_identifier_spelling() {
		assert_eq!(Characteristic::Degree360.to_string(), "Degree360");
		assert_eq!(Characteristic::Lawless.as_str(), "Lawless");
	}
}
