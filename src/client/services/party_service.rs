//! The in-memory party collection behind the parties screen.

use std::collections::HashSet;

use uuid::Uuid;

use crate::common::models::{Participant, Party};

#[derive(Debug, Default)]
pub struct PartyService {
    pub parties: Vec<Party>,
}

impl PartyService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quick-add a party; the creator becomes its first (admin) participant.
    /// New parties go to the top of the list.
    pub fn add_party(&mut self, title: &str, date_range: &str, creator: Participant) -> Uuid {
        let party = Party::new(title, date_range, vec![creator]);
        let id = party.id;
        self.parties.insert(0, party);
        id
    }

    pub fn get(&self, id: Uuid) -> Option<&Party> {
        self.parties.iter().find(|p| p.id == id)
    }

    /// Replace a stored party with an edited copy, matched by id.
    pub fn update(&mut self, updated: Party) {
        if let Some(slot) = self.parties.iter_mut().find(|p| p.id == updated.id) {
            *slot = updated;
        }
    }

    /// Parties whose title or date range contains `query`, case-insensitive.
    /// A blank query returns everything.
    pub fn filtered(&self, query: &str) -> Vec<&Party> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.parties.iter().collect();
        }
        self.parties
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&query)
                    || p.date_range.to_lowercase().contains(&query)
            })
            .collect()
    }
}

/// Apply a title/date edit, ignoring empty replacement strings.
pub fn apply_title_edit(party: &mut Party, title: &str, date_range: &str) {
    if !title.is_empty() {
        party.title = title.to_string();
    }
    if !date_range.is_empty() {
        party.date_range = date_range.to_string();
    }
}

/// Replace the participant set from a saved selection over `all_users`.
/// Retained ids keep their existing entries (admin flags included); newly
/// selected users join as non-admin. When the result has no admin at all,
/// the first participant is promoted.
pub fn replace_participants(
    party: &mut Party,
    all_users: &[Participant],
    selection: &HashSet<Uuid>,
) {
    let mut next: Vec<Participant> = Vec::new();
    for user in all_users {
        if !selection.contains(&user.id) {
            continue;
        }
        match party.participants.iter().find(|p| p.id == user.id) {
            Some(existing) => next.push(existing.clone()),
            None => next.push(Participant {
                is_admin: false,
                ..user.clone()
            }),
        }
    }
    if !next.is_empty() && !next.iter().any(|p| p.is_admin) {
        next[0].is_admin = true;
    }
    party.participants = next;
}

/// Users whose name contains `query`, case-insensitive; blank matches all.
pub fn filter_users<'a>(all_users: &'a [Participant], query: &str) -> Vec<&'a Participant> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return all_users.iter().collect();
    }
    all_users
        .iter()
        .filter(|u| u.name.to_lowercase().contains(&query))
        .collect()
}
