#![allow(dead_code)]

use dynserd::*;
use serde_derive::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

coding_keys! {
    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "lowercase")]
    pub enum PostType {
        Text = "text",
        Picture = "picture",
        Audio = "audio",
        Video = "video",
    }
}

pub const ALL_TYPES: [PostType; 4] = [
    PostType::Text,
    PostType::Picture,
    PostType::Audio,
    PostType::Video,
];

pub trait Post: DynEncode + fmt::Debug {
    fn kind(&self) -> PostType;
    fn id(&self) -> u32;
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TextPost {
    #[serde(rename = "type")]
    pub kind: PostType,
    pub id: u32,
    pub author: String,
    pub likes: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PicturePost {
    #[serde(rename = "type")]
    pub kind: PostType,
    pub id: u32,
    pub author: String,
    pub likes: u32,
    pub url: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPost {
    #[serde(rename = "type")]
    pub kind: PostType,
    pub id: u32,
    pub author: String,
    pub likes: u32,
    pub audio_url: String,
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VideoPost {
    #[serde(rename = "type")]
    pub kind: PostType,
    pub id: u32,
    pub author: String,
    pub likes: u32,
    pub url: String,
    pub duration: u32,
    pub thumbnail: String,
}

serde_codable!(TextPost, PicturePost, AudioPost, VideoPost);
upcast_boxed!(Box<dyn Post>: TextPost, PicturePost, AudioPost, VideoPost);

macro_rules! impl_post {
    ($($t:ty),+) => {
	$(
	impl Post for $t {
	    fn kind(&self) -> PostType {
		self.kind
	    }

	    fn id(&self) -> u32 {
		self.id
	    }
	}
	)+
    };
}

impl_post!(TextPost, PicturePost, AudioPost, VideoPost);

impl IdentifierKey for PostType {
    type Identified = Box<dyn Post>;

    fn context(&self) -> DecodingContext<Box<dyn Post>> {
        match self {
            PostType::Text => DecodingContext::of::<TextPost>(),
            PostType::Picture => DecodingContext::of::<PicturePost>(),
            PostType::Audio => DecodingContext::of::<AudioPost>(),
            PostType::Video => DecodingContext::of::<VideoPost>(),
        }
    }
}

impl ContainerCodingKey for PostType {
    type Contained = Box<dyn Post>;

    fn contained_context(&self) -> DecodingContext<Box<dyn Post>> {
        self.context()
    }
}

coding_keys! {
    pub enum PostKey { Type = "type" }
}

impl IdentifierCodingKey for PostKey {
    type Identifier = PostType;

    fn identifier_key() -> Self {
        PostKey::Type
    }
}

/// Posts discriminated by their own `type` field.
pub type Posts<P> = DynamicCollection<ByKey<PostKey>, Vec<Box<dyn Post>>, P>;

coding_keys! {
    pub enum PageKey { Content = "content", Next = "next" }
}

/// A page of a feed.
pub struct Page<P> {
    pub content: Posts<P>,
    pub next: Option<String>,
}

impl<P: CollectionPolicy> Decode for Page<P> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let c = decoder.keyed::<PageKey>()?;
        Ok(Page {
            content: c.field(PageKey::Content)?,
            next: c.decode_opt(PageKey::Next)?
        })
    }
}

impl<P: CollectionPolicy> Encode for Page<P> {
    fn encode(&self) -> Result<Value> {
        let mut page = KeyedEncoder::new();
        page.encode_dyn(PageKey::Content, &self.content)?;
        page.encode_opt(PageKey::Next, &self.next)?;
        Ok(page.finish())
    }
}

pub const PAGE: &str = r#"{
    "content": [
        {
            "type": "video",
            "id": 1,
            "author": "ana",
            "likes": 10,
            "url": "https://example.com/v/1.mp4",
            "duration": 460,
            "thumbnail": "https://example.com/v/1.png"
        },
        {
            "type": "text",
            "id": 2,
            "author": "bo",
            "likes": 2,
            "text": "Hello, world!"
        },
        {
            "type": "audio",
            "id": 3,
            "author": "cy",
            "likes": 0,
            "duration": 120
        }
    ],
    "next": "https://example.com/feed?page=2"
}"#;

pub const BY_TYPE: &str = r#"{
    "text": [
        {"type": "text", "id": 1, "author": "ana", "likes": 1, "text": "one"},
        {"type": "text", "id": 2, "author": "bo", "likes": 2, "text": "two"},
        {"type": "text", "id": 3, "author": "cy", "likes": 3, "text": "three"}
    ],
    "audio": [
        {"type": "audio", "id": 4, "author": "di", "likes": 4, "audioUrl": "https://example.com/a/4.mp3", "duration": 30},
        {"type": "audio", "id": 5, "author": "ed", "likes": 5, "duration": 31}
    ]
}"#;

/// A well formed post of `kind`.
pub fn post(kind: PostType, id: u32) -> Value {
    let extra = match kind {
        PostType::Text => json!({ "text": format!("post number {}", id) }),
        PostType::Picture => json!({
            "url": format!("https://example.com/p/{}.png", id),
            "caption": "a picture"
        }),
        PostType::Audio => json!({
            "audioUrl": format!("https://example.com/a/{}.mp3", id),
            "duration": 60 + id
        }),
        PostType::Video => json!({
            "url": format!("https://example.com/v/{}.mp4", id),
            "duration": 600 + id,
            "thumbnail": format!("https://example.com/v/{}.png", id)
        }),
    };

    let mut value = json!({
        "type": kind.name().into_owned(),
        "id": id,
        "author": format!("author-{}", id),
        "likes": id * 3
    });
    if let (Some(fields), Value::Object(extra)) = (value.as_object_mut(), extra) {
        fields.extend(extra);
    }
    value
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Malformation {
    MissingField,
    UnknownType,
    WrongPayload,
    Nested,
}

pub const MALFORMATIONS: [Malformation; 4] = [
    Malformation::MissingField,
    Malformation::UnknownType,
    Malformation::WrongPayload,
    Malformation::Nested,
];

/// Break a post so that it no longer decodes.
pub fn malform(value: Value, how: Malformation) -> Value {
    if how == Malformation::Nested {
        return Value::Array(vec![Value::Array(vec![value, json!({})])]);
    }

    let mut value = value;
    if let Some(fields) = value.as_object_mut() {
        match how {
            Malformation::MissingField => {
                for field in &["text", "url", "audioUrl"] {
                    fields.remove(*field);
                }
            }
            Malformation::UnknownType => {
                fields.insert("type".into(), Value::from("podcast"));
            }
            Malformation::WrongPayload => {
                fields.insert("id".into(), Value::from("not a number"));
            }
            Malformation::Nested => (),
        }
    }
    value
}

pub fn ids(posts: &[Box<dyn Post>]) -> Vec<u32> {
    posts.iter().map(|post| post.id()).collect()
}

pub fn kinds(posts: &[Box<dyn Post>]) -> Vec<PostType> {
    posts.iter().map(|post| post.kind()).collect()
}
