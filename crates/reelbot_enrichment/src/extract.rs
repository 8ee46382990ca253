use serenity::all::{Embed, Message, MessageUpdateEvent, UserId};

/// Field-name fragments that mark the requested title in a ticket embed.
pub const TITLE_FIELD_TOKENS: [&str; 2] = ["movie name", "series name"];

/// Discord never delivers more than this, so neither do we scan more.
const MAX_EMBEDS: usize = 10;
const MAX_FIELDS_PER_EMBED: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateField<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateEmbed<'a> {
    pub fields: Vec<CandidateField<'a>>,
}

/// The parts of a message (or message edit) the extractor looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMessage<'a> {
    pub author_id: UserId,
    pub embeds: Vec<CandidateEmbed<'a>>,
}

impl<'a> CandidateMessage<'a> {
    pub fn from_embeds(author_id: UserId, embeds: &'a [Embed]) -> Self {
        let embeds = embeds
            .iter()
            .map(|embed| CandidateEmbed {
                fields: embed
                    .fields
                    .iter()
                    .map(|f| CandidateField { name: &f.name, value: &f.value })
                    .collect(),
            })
            .collect();
        Self { author_id, embeds }
    }

    pub fn from_message(msg: &'a Message) -> Self {
        Self::from_embeds(msg.author.id, &msg.embeds)
    }

    /// Edits only carry the author and embeds when those changed; without both there is
    /// nothing to look at and the full message has to be fetched instead.
    pub fn from_update(event: &'a MessageUpdateEvent) -> Option<Self> {
        let author = event.author.as_ref()?;
        let embeds = event.embeds.as_ref()?;
        Some(Self::from_embeds(author.id, embeds))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The requested title.
    Title(String),
    /// A ticket-bot embed, but without a usable title field (yet).
    NotFound,
}

fn is_title_field(name: &str) -> bool {
    let name = name.to_lowercase();
    TITLE_FIELD_TOKENS.iter().any(|token| name.contains(token))
}

/// Pull the requested title out of a ticket-bot embed.
///
/// Returns `None` when the message isn't a ticket-bot embed with fields at all.
/// Embeds and fields are scanned in the order Discord delivered them; the first title
/// field with a non-blank value wins.
pub fn extract(msg: &CandidateMessage<'_>, ticket_bot: UserId) -> Option<Extraction> {
    if msg.author_id != ticket_bot {
        return None;
    }
    let embeds = &msg.embeds[..msg.embeds.len().min(MAX_EMBEDS)];
    if !embeds.iter().any(|e| !e.fields.is_empty()) {
        return None;
    }

    let title = embeds
        .iter()
        .flat_map(|e| e.fields.iter().take(MAX_FIELDS_PER_EMBED))
        .filter(|field| is_title_field(field.name))
        .map(|field| field.value.trim())
        .find(|value| !value.is_empty());

    Some(match title {
        Some(title) => Extraction::Title(title.to_string()),
        None => Extraction::NotFound,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TICKET_BOT: UserId = UserId::new(557628352828014614);

    fn embed<'a>(fields: &[(&'a str, &'a str)]) -> CandidateEmbed<'a> {
        CandidateEmbed {
            fields: fields.iter().map(|&(name, value)| CandidateField { name, value }).collect(),
        }
    }

    fn msg<'a>(author: UserId, embeds: Vec<CandidateEmbed<'a>>) -> CandidateMessage<'a> {
        CandidateMessage { author_id: author, embeds }
    }

    #[test]
    fn matches_case_insensitive_substrings() {
        let m = msg(TICKET_BOT, vec![embed(&[("Series Name (Primary)", "Suits")])]);
        assert_eq!(extract(&m, TICKET_BOT), Some(Extraction::Title("Suits".into())));

        let m = msg(TICKET_BOT, vec![embed(&[("What is the MOVIE NAME?", "  Dune (2021) ")])]);
        assert_eq!(extract(&m, TICKET_BOT), Some(Extraction::Title("Dune (2021)".into())));
    }

    #[test]
    fn other_authors_are_ignored() {
        let m = msg(UserId::new(1), vec![embed(&[("Movie Name", "Dune")])]);
        assert_eq!(extract(&m, TICKET_BOT), None);
    }

    #[test]
    fn messages_without_fields_are_not_candidates() {
        assert_eq!(extract(&msg(TICKET_BOT, vec![]), TICKET_BOT), None);
        assert_eq!(extract(&msg(TICKET_BOT, vec![embed(&[])]), TICKET_BOT), None);
    }

    #[test]
    fn ticket_embed_without_title_is_not_found() {
        let m = msg(TICKET_BOT, vec![embed(&[("Requested by", "someone"), ("Quality", "1080p")])]);
        assert_eq!(extract(&m, TICKET_BOT), Some(Extraction::NotFound));
    }

    #[test]
    fn blank_title_fields_are_skipped() {
        let m = msg(TICKET_BOT, vec![embed(&[("Movie Name", "   ")])]);
        assert_eq!(extract(&m, TICKET_BOT), Some(Extraction::NotFound));

        let m = msg(TICKET_BOT, vec![embed(&[("Movie Name", ""), ("Series Name", "Suits")])]);
        assert_eq!(extract(&m, TICKET_BOT), Some(Extraction::Title("Suits".into())));
    }

    #[test]
    fn first_match_wins_across_embeds() {
        let m = msg(
            TICKET_BOT,
            vec![
                embed(&[]),
                embed(&[("Details", "none"), ("Series Name", "Suits")]),
                embed(&[("Movie Name", "Dune")]),
            ],
        );
        assert_eq!(extract(&m, TICKET_BOT), Some(Extraction::Title("Suits".into())));
    }

    fn ticket_bot_json() -> serde_json::Value {
        json!({
            "id": TICKET_BOT.to_string(),
            "username": "Tickets",
            "discriminator": "0",
            "global_name": null,
            "avatar": null,
            "bot": true
        })
    }

    fn title_embed_json() -> serde_json::Value {
        json!({"fields": [
            {"name": "Requested by", "value": "someone", "inline": true},
            {"name": "Movie Name", "value": "Dune", "inline": false}
        ]})
    }

    fn update(payload: serde_json::Value) -> MessageUpdateEvent {
        serde_json::from_value(payload).unwrap()
    }

    #[test]
    fn full_edits_become_candidates() {
        let event = update(json!({
            "id": "1180000000000000001",
            "channel_id": "1001",
            "author": ticket_bot_json(),
            "embeds": [title_embed_json()]
        }));
        let candidate = CandidateMessage::from_update(&event).unwrap();
        assert_eq!(candidate.author_id, TICKET_BOT);
        assert_eq!(candidate.embeds.len(), 1);
        assert_eq!(candidate.embeds[0].fields[1], CandidateField { name: "Movie Name", value: "Dune" });
        assert_eq!(extract(&candidate, TICKET_BOT), Some(Extraction::Title("Dune".into())));
    }

    #[test]
    fn partial_edits_need_the_full_message() {
        let without_author = update(json!({
            "id": "1180000000000000001",
            "channel_id": "1001",
            "embeds": [title_embed_json()]
        }));
        assert_eq!(CandidateMessage::from_update(&without_author), None);

        let without_embeds = update(json!({
            "id": "1180000000000000001",
            "channel_id": "1001",
            "author": ticket_bot_json()
        }));
        assert_eq!(CandidateMessage::from_update(&without_embeds), None);
    }

    #[test]
    fn field_order_is_authoritative() {
        let m = msg(TICKET_BOT, vec![embed(&[("Series Name", "Suits"), ("Movie Name", "Dune")])]);
        assert_eq!(extract(&m, TICKET_BOT), Some(Extraction::Title("Suits".into())));
    }
}
