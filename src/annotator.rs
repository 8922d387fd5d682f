//! Top-level annotation pipeline.

use log::warn;

use crate::category::{self, OTHER_CATEGORY};
use crate::entity::{DocumentAnnotation, Entity, Polarity, Token};
use crate::error::Result;
use crate::knowledge::{gazetteer_candidates, KnowledgeBase, MemoryKnowledgeBase};
use crate::merge;
use crate::offset::DocView;
use crate::recognizers::{self, Candidate};
use crate::segment::{align_tokens, char_class_tokens, JiebaSegmenter, Segmenter};
use crate::sentiment::{self, LexiconSentiment, SentimentModel};

/// Rule-based document annotator.
///
/// Owns its collaborators behind trait objects so embedders and tests can
/// substitute any of them; [`Annotator::new`] wires the defaults. The
/// annotator holds no per-document state: every call is a pure function of
/// the input text and the current gazetteer snapshot, read once at the
/// start of the call.
pub struct Annotator {
    segmenter: Box<dyn Segmenter>,
    sentiment: Box<dyn SentimentModel>,
    knowledge: Box<dyn KnowledgeBase>,
}

impl Annotator {
    /// Annotator with the default collaborators: jieba segmentation,
    /// word-list sentiment, empty in-memory gazetteer.
    #[must_use]
    pub fn new() -> Self {
        Annotator::with_components(
            Box::new(JiebaSegmenter::new()),
            Box::new(LexiconSentiment::new()),
            Box::new(MemoryKnowledgeBase::new()),
        )
    }

    /// Annotator over caller-supplied collaborators.
    #[must_use]
    pub fn with_components(
        segmenter: Box<dyn Segmenter>,
        sentiment: Box<dyn SentimentModel>,
        knowledge: Box<dyn KnowledgeBase>,
    ) -> Self {
        Annotator {
            segmenter,
            sentiment,
            knowledge,
        }
    }

    /// The knowledge base backing gazetteer matching. Callers confirm
    /// entities through this handle; the annotator itself never writes to
    /// it mid-pass.
    pub fn knowledge(&self) -> &dyn KnowledgeBase {
        self.knowledge.as_ref()
    }

    /// Full pipeline: tokens, category, sentiment, entities.
    ///
    /// Empty or whitespace-only input short-circuits to the neutral empty
    /// annotation. Collaborator failures degrade per component (neutral
    /// sentiment, character tokens, no gazetteer matches) and are logged
    /// rather than surfaced, so the call itself does not fail on them.
    pub fn annotate(&self, text: &str) -> Result<DocumentAnnotation> {
        if text.trim().is_empty() {
            return Ok(DocumentAnnotation {
                category: OTHER_CATEGORY.to_owned(),
                sentiment: Polarity::Neutral,
                sentiment_score: sentiment::FALLBACK_SCORE,
                tokens: Vec::new(),
                entities: Vec::new(),
            });
        }
        let doc = DocView::new(text);
        let tokens = self.tokens_for(&doc);
        let (polarity, score) = sentiment::assess(self.sentiment.as_ref(), text);
        let entities = self.entities_for(&doc, &tokens);
        Ok(DocumentAnnotation {
            category: category::classify(text).to_owned(),
            sentiment: polarity,
            sentiment_score: score,
            tokens,
            entities,
        })
    }

    /// Segmentation and POS tagging alone.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let doc = DocView::new(text);
        Ok(self.tokens_for(&doc))
    }

    /// Entity pipeline alone: gazetteer, recognizers, merge.
    pub fn recognize(&self, text: &str) -> Result<Vec<Entity>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let doc = DocView::new(text);
        let tokens = self.tokens_for(&doc);
        Ok(self.entities_for(&doc, &tokens))
    }

    fn tokens_for(&self, doc: &DocView<'_>) -> Vec<Token> {
        match self.segmenter.segment(doc.text()) {
            Ok(words) if !words.is_empty() => align_tokens(doc, &words),
            Ok(_) => {
                warn!("segmenter returned no words; falling back to character tokens");
                char_class_tokens(doc)
            }
            Err(err) => {
                warn!("segmentation failed ({err}); falling back to character tokens");
                char_class_tokens(doc)
            }
        }
    }

    fn entities_for(&self, doc: &DocView<'_>, tokens: &[Token]) -> Vec<Entity> {
        let mut batches: Vec<Vec<Candidate>> = Vec::with_capacity(6);
        match self.knowledge.list_entries() {
            Ok(entries) => batches.push(gazetteer_candidates(doc, &entries)),
            Err(err) => {
                warn!("knowledge base unavailable ({err}); skipping gazetteer pass");
                batches.push(Vec::new());
            }
        }
        for recognizer in recognizers::all() {
            match recognizer.recognize(doc, tokens) {
                Ok(candidates) => batches.push(candidates),
                Err(err) => {
                    warn!(
                        "{} recognizer failed ({err}); it contributes nothing",
                        recognizer.name()
                    );
                    batches.push(Vec::new());
                }
            }
        }
        merge::resolve(doc, &batches)
    }
}

impl Default for Annotator {
    fn default() -> Self {
        Annotator::new()
    }
}
