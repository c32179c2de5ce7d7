use crate::{ChatMessage, ConversationTurn};
use std::collections::VecDeque;

pub const DEFAULT_MAX_HISTORY: usize = 5;

/// Most recent exchanges, oldest evicted first.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    turns: VecDeque<ConversationTurn>,
    max_turns: usize,
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl ConversationHistory {
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(max_turns),
            max_turns,
        }
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        if self.max_turns == 0 {
            return;
        }
        while self.turns.len() >= self.max_turns {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    pub fn turns(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    /// Alternating user/assistant messages, oldest first.
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        self.turns
            .iter()
            .flat_map(|t| {
                [
                    ChatMessage::user(t.user.clone()),
                    ChatMessage::assistant(t.assistant.clone()),
                ]
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    #[test]
    fn evicts_oldest_beyond_bound() {
        let mut history = ConversationHistory::new(3);
        for i in 0..7 {
            history.push(ConversationTurn::new(format!("q{i}"), format!("a{i}")));
            assert!(history.len() <= 3);
        }
        let users: Vec<&str> = history.turns().map(|t| t.user.as_str()).collect();
        assert_eq!(users, ["q4", "q5", "q6"]);
    }

    #[test]
    fn messages_alternate() {
        let mut history = ConversationHistory::default();
        history.push(ConversationTurn::new("Hoi", "Sali"));
        history.push(ConversationTurn::new("Wie gahts?", "Guet."));
        let roles: Vec<Role> = history.to_messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, [Role::User, Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(history.to_messages()[3].content, "Guet.");
    }

    #[test]
    fn zero_bound_keeps_nothing() {
        let mut history = ConversationHistory::new(0);
        history.push(ConversationTurn::new("Hoi", "Sali"));
        assert!(history.is_empty());
    }

    #[test]
    fn clear_empties() {
        let mut history = ConversationHistory::default();
        history.push(ConversationTurn::new("Hoi", "Sali"));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.max_turns(), DEFAULT_MAX_HISTORY);
    }
}
