//! Dynamic-zone content blocks and their media resolution.

use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::SeedError;
use super::media::{MediaLibrary, MediaRef, resolve_files};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaBlock {
    pub file: MediaRef,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderBlock {
    pub files: MediaRef,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBlock {
    pub title: String,
    pub body: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBlock {
    pub title: String,
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkBlock {
    pub text: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A block of a dynamic zone, tagged in JSON by `__component`.
///
/// Components without their own variant are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Media(MediaBlock),
    Slider(SliderBlock),
    RichText(RichTextBlock),
    Quote(QuoteBlock),
    Question(QuestionBlock),
    Link(LinkBlock),
    Other(Value),
}

const TAG: &str = "__component";

impl ContentBlock {
    /// The `__component` name, e.g. `shared.media`.
    pub fn component(&self) -> &str {
        match self {
            ContentBlock::Media(_) => "shared.media",
            ContentBlock::Slider(_) => "shared.slider",
            ContentBlock::RichText(_) => "shared.rich-text",
            ContentBlock::Quote(_) => "shared.quote",
            ContentBlock::Question(_) => "shared.question",
            ContentBlock::Link(_) => "shared.link",
            ContentBlock::Other(value) => value.get(TAG).and_then(Value::as_str).unwrap_or(""),
        }
    }

    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        let component = value
            .get(TAG)
            .and_then(Value::as_str)
            .ok_or_else(|| serde_json::Error::custom("content block is missing `__component`"))?
            .to_string();

        let mut fields = value;
        if let Value::Object(map) = &mut fields {
            map.remove(TAG);
        }

        Ok(match component.as_str() {
            "shared.media" => ContentBlock::Media(serde_json::from_value(fields)?),
            "shared.slider" => ContentBlock::Slider(serde_json::from_value(fields)?),
            "shared.rich-text" => ContentBlock::RichText(serde_json::from_value(fields)?),
            "shared.quote" => ContentBlock::Quote(serde_json::from_value(fields)?),
            "shared.question" => ContentBlock::Question(serde_json::from_value(fields)?),
            "shared.link" => ContentBlock::Link(serde_json::from_value(fields)?),
            _ => {
                if let Value::Object(map) = &mut fields {
                    map.insert(TAG.into(), Value::String(component));
                }
                ContentBlock::Other(fields)
            }
        })
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let mut value = match self {
            ContentBlock::Media(block) => serde_json::to_value(block)?,
            ContentBlock::Slider(block) => serde_json::to_value(block)?,
            ContentBlock::RichText(block) => serde_json::to_value(block)?,
            ContentBlock::Quote(block) => serde_json::to_value(block)?,
            ContentBlock::Question(block) => serde_json::to_value(block)?,
            ContentBlock::Link(block) => serde_json::to_value(block)?,
            ContentBlock::Other(value) => return Ok(value.clone()),
        };
        if let Value::Object(map) = &mut value {
            map.insert(TAG.into(), Value::String(self.component().to_string()));
        }
        Ok(value)
    }
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ContentBlock::from_json(value).map_err(D::Error::custom)
    }
}

impl Serialize for ContentBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

/// Return a copy of `blocks` with the file names of media and slider blocks
/// replaced by file records. Other blocks are copied unchanged.
///
/// Blocks are handled one at a time, so a file uploaded for one block is
/// reused by any later block naming it.
pub async fn resolve_blocks(
    library: &dyn MediaLibrary,
    uploads_dir: &Path,
    blocks: &[ContentBlock],
) -> Result<Vec<ContentBlock>, SeedError> {
    let mut resolved = Vec::with_capacity(blocks.len());
    for block in blocks {
        let next = match block {
            ContentBlock::Media(media) => match media.file.pending_names() {
                Some(names) => ContentBlock::Media(MediaBlock {
                    file: resolve_files(library, uploads_dir, &names).await?.into(),
                    extra: media.extra.clone(),
                }),
                None => block.clone(),
            },
            ContentBlock::Slider(slider) => match slider.files.pending_names() {
                Some(names) => ContentBlock::Slider(SliderBlock {
                    files: resolve_files(library, uploads_dir, &names).await?.into(),
                    extra: slider.extra.clone(),
                }),
                None => block.clone(),
            },
            ContentBlock::RichText(_)
            | ContentBlock::Quote(_)
            | ContentBlock::Question(_)
            | ContentBlock::Link(_)
            | ContentBlock::Other(_) => block.clone(),
        };
        resolved.push(next);
    }
    Ok(resolved)
}
