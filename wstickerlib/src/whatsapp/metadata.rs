use serde::{Deserialize, Serialize};

/// Publisher and legal information added to every pack.
/// Missing fields are filled with the defaults, when deserialized.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct MetaData {
	/// only used if the sticker set does not have its own publisher
	pub publisher: String,
	pub publisher_email: String,
	pub publisher_website: String,
	pub privacy_policy_website: String,
	pub license_agreement_website: String
}

impl Default for MetaData {
	fn default() -> Self {
		Self {
			publisher: "Tele2Whats Studio".to_owned(),
			publisher_email: "stickers@tele2whats.app".to_owned(),
			publisher_website: "https://tele2whats.app".to_owned(),
			privacy_policy_website: "https://tele2whats.app/privacy".to_owned(),
			license_agreement_website: "https://tele2whats.app/license".to_owned()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_override() {
		let metadata: MetaData = serde_json::from_str(r#"{"publisher": "Me"}"#).unwrap();
		assert_eq!(metadata.publisher, "Me");
		assert_eq!(metadata.publisher_email, MetaData::default().publisher_email);
		assert_eq!(metadata.license_agreement_website, "https://tele2whats.app/license");
	}
}
