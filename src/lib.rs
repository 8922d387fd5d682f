//! # hanno
//!
//! Rule-based Chinese text annotation: one call produces tokens with POS
//! tags, a topical category, a sentiment bucket, and named entities.
//!
//! - **Tokens**: jieba segmentation folded into a 12-tag POS scheme, with
//!   exact character offsets into the source text.
//! - **Category**: weighted keyword scoring over nine fixed topics, with a
//!   sentinel `其他` fallback.
//! - **Sentiment**: a polarity score in `[0, 1]` bucketed into 积极 / 消极 /
//!   中性.
//! - **Entities**: five independent rule recognizers (time, amount, person,
//!   location, organization) plus a user-extensible gazetteer, merged into
//!   one sorted, non-overlapping span list.
//!
//! ## Quick start
//!
//! ```rust
//! use hanno::Annotator;
//!
//! let annotator = Annotator::new();
//! let doc = annotator.annotate("2024年3月1日，张三在北京签署了合同，金额为100万元。")?;
//!
//! assert_eq!(doc.category, "法律法规");
//! let spans: Vec<(&str, &str)> = doc
//!     .entities
//!     .iter()
//!     .map(|e| (e.text.as_str(), e.label.as_label()))
//!     .collect();
//! assert_eq!(
//!     spans,
//!     [
//!         ("2024年3月1日", "时间日期"),
//!         ("张三", "人名"),
//!         ("北京", "地名"),
//!         ("100万元", "数值金额"),
//!     ]
//! );
//! # Ok::<(), hanno::Error>(())
//! ```
//!
//! ## Teaching the annotator
//!
//! Entities confirmed by a human go back into the knowledge base through
//! [`KnowledgeBase::add_or_bump`] and win their spans outright on later
//! calls:
//!
//! ```rust
//! use hanno::{Annotator, EntityType};
//!
//! let annotator = Annotator::new();
//! annotator
//!     .knowledge()
//!     .add_or_bump("云深不知处", EntityType::Location, "user")?;
//!
//! let entities = annotator.recognize("他们回到云深不知处休整")?;
//! assert_eq!(entities.len(), 1);
//! assert_eq!(entities[0].text, "云深不知处");
//! # Ok::<(), hanno::Error>(())
//! ```
//!
//! ## Offsets
//!
//! Every span, token or entity, is half-open `[start, end)` in character
//! offsets (Unicode scalar values) of the original document, never bytes.
//! The whole pipeline is a pure function of the input text and the current
//! gazetteer snapshot: annotating the same text twice against the same
//! snapshot yields identical output.

#![warn(missing_docs)]

mod annotator;
mod category;
mod entity;
mod error;
mod knowledge;
mod merge;
mod offset;
mod recognizers;
mod segment;
mod sentiment;

// Re-exports
pub use annotator::Annotator;
pub use category::{classify, OTHER_CATEGORY};
pub use entity::{DocumentAnnotation, Entity, EntityType, Polarity, PosTag, Token};
pub use error::{Error, Result};
pub use knowledge::{KnowledgeBase, KnowledgeEntry, MemoryKnowledgeBase};
pub use segment::{JiebaSegmenter, RawWord, Segmenter};
pub use sentiment::{polarity_of, LexiconSentiment, SentimentModel};
