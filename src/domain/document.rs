use crate::utils::error::{ObsError, Result};
use quick_xml::de::DeError;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{de::DeserializeOwned, Serialize};

/// A record with a fixed root element in the build service's XML format.
///
/// Serialization writes `ELEMENT_NAME` as the root, attributes and children in
/// field declaration order, and leaves out unset optional fields and empty lists.
pub trait XmlDocument: Serialize + DeserializeOwned {
    const ELEMENT_NAME: &'static str;

    fn to_document(&self) -> Result<String> {
        Ok(quick_xml::se::to_string_with_root(Self::ELEMENT_NAME, self)?)
    }

    fn from_document(document: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(document)
            .map_err(|e| ObsError::XmlParse(DeError::Custom(format!("invalid UTF-8: {}", e))))?;

        let found = root_element_name(text)?;
        if found != Self::ELEMENT_NAME {
            return Err(ObsError::UnexpectedRoot {
                expected: Self::ELEMENT_NAME.to_string(),
                found,
            });
        }

        Ok(quick_xml::de::from_str(text)?)
    }
}

/// Name of the first element in `document`, skipping the declaration and comments.
pub fn root_element_name(document: &str) -> Result<String> {
    let mut reader = Reader::from_str(document);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return Ok(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Ok(Event::Eof) => {
                return Err(ObsError::XmlParse(DeError::Custom(
                    "document has no root element".to_string(),
                )));
            }
            Ok(_) => continue,
            Err(e) => return Err(ObsError::XmlParse(DeError::from(e))),
        }
    }
}
