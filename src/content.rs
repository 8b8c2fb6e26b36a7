//! The embedded study deck: flashcards for each content section and the
//! question list for practice mode. Shipped as TOML in `assets/content/`.

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use rust_embed::Embed;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::nav::{ORDER, Section};

#[derive(Embed)]
#[folder = "assets/content/"]
struct ContentAssets;

#[derive(Clone, Debug, Deserialize)]
pub struct Card {
    pub front: String,
    pub back: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CardSet {
    pub title: String,
    #[serde(default)]
    pub intro: String,
    pub cards: Vec<Card>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    #[serde(default)]
    pub hint: String,
}

#[derive(Debug, Deserialize)]
struct QuestionFile {
    questions: Vec<Question>,
}

pub struct Deck {
    sets: HashMap<Section, CardSet>,
    questions: Vec<Question>,
}

impl Deck {
    /// Parse every bundled content file. Bad bundled content is a build
    /// mistake, so this fails startup rather than limping along.
    pub fn load() -> Result<Self> {
        let mut sets = HashMap::new();
        for section in ORDER {
            if !section.has_cards() {
                continue;
            }
            let set: CardSet = parse_asset(&format!("{}.toml", section.id()))?;
            sets.insert(section, set);
        }

        let file: QuestionFile = parse_asset("practice.toml")?;
        if file.questions.is_empty() {
            bail!("practice.toml contains no questions");
        }

        Ok(Self {
            sets,
            questions: file.questions,
        })
    }

    pub fn cards(&self, section: Section) -> Option<&CardSet> {
        self.sets.get(&section)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

fn parse_asset<T: DeserializeOwned>(name: &str) -> Result<T> {
    let file =
        ContentAssets::get(name).with_context(|| format!("missing content asset {name}"))?;
    let text = std::str::from_utf8(file.data.as_ref())
        .with_context(|| format!("content asset {name} is not UTF-8"))?;
    toml::from_str(text).with_context(|| format!("content asset {name} failed to parse"))
}
