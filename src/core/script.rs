//! # Reply Script
//!
//! K-Bot doesn't reason. Every reply is canned: the user's text is matched
//! against keyword rules, and the first rule that hits decides both the
//! reply text and which category leads the carousel. Anything unmatched
//! falls through to the default northern-Okinawa pitch.
//!
//! The script also owns the scripted opening shown at session start.

use crate::core::catalog::{Category, PoiCatalog, PoiId};
use crate::core::message::{MapPreview, MessageBody};

/// A canned reply: text first, then a carousel of `pois`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub pois: Vec<PoiId>,
}

struct ReplyRule {
    keywords: &'static [&'static str],
    reply: Reply,
}

pub struct ReplyScript {
    rules: Vec<ReplyRule>,
    fallback: Reply,
    opening: Vec<MessageBody>,
}

const FOOD_KEYWORDS: &[&str] = &["吃", "餐", "饭", "美食", "food", "eat", "restaurant"];
const SCENERY_KEYWORDS: &[&str] = &["海", "岛", "景", "拍照", "兜风", "beach", "island", "view"];

const FOOD_REPLY: &str = "好吃的交给我！北部这几家都很有在地感，吃完刚好顺路去看海。👇";
const SCENERY_REPLY: &str = "想看海的话，北部的果冻海一定不能错过，附近也有好吃的。👇";
const DEFAULT_REPLY: &str =
    "既然去了北部，这两家非常值得一去！一家是吃猪肉火锅的，另一家适合兜风拍照。👇";

const GREETING: &str = "嗨！我是你在冲绳的本地朋友 K-Bot。🍊";
const ITINERARY_PITCH: &str = "看到你这次计划玩 5 天，主要想放松。那我建议我们避开国际通，直接去北部看海？这是大概的方位。";

impl ReplyScript {
    /// The Okinawa pre-trip script, with carousels drawn from `catalog`.
    pub fn okinawa(catalog: &PoiCatalog) -> Self {
        let rules = vec![
            ReplyRule {
                keywords: FOOD_KEYWORDS,
                reply: Reply {
                    text: FOOD_REPLY.to_string(),
                    pois: ids_leading_with(catalog, Category::Restaurant),
                },
            },
            ReplyRule {
                keywords: SCENERY_KEYWORDS,
                reply: Reply {
                    text: SCENERY_REPLY.to_string(),
                    pois: ids_leading_with(catalog, Category::Attraction),
                },
            },
        ];

        let fallback = Reply {
            text: DEFAULT_REPLY.to_string(),
            pois: catalog.iter().map(|poi| poi.id).collect(),
        };

        let opening = vec![
            MessageBody::Text(GREETING.to_string()),
            MessageBody::Text(ITINERARY_PITCH.to_string()),
            MessageBody::MapPreview(MapPreview {
                badge: "北部的冲绳".to_string(),
                title: "推荐探索区域".to_string(),
                subtitle: "包括古宇利岛、美丽海水族馆区域".to_string(),
            }),
        ];

        Self {
            rules,
            fallback,
            opening,
        }
    }

    /// Picks the reply for a user submission.
    pub fn select(&self, user_text: &str) -> &Reply {
        let lowered = user_text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| lowered.contains(kw)))
            .map(|rule| &rule.reply)
            .unwrap_or(&self.fallback)
    }

    /// Assistant messages that open a fresh session.
    pub fn opening(&self) -> &[MessageBody] {
        &self.opening
    }
}

/// Catalog ids with `lead` entries first; source order otherwise kept.
fn ids_leading_with(catalog: &PoiCatalog, lead: Category) -> Vec<PoiId> {
    let (mut first, rest): (Vec<_>, Vec<_>) = catalog.iter().partition(|poi| poi.category == lead);
    first.extend(rest);
    first.into_iter().map(|poi| poi.id).collect()
}
