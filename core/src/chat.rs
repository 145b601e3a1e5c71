use crate::types::{Message, User};

/// 表示用のメッセージ行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLine<'a> {
    pub message: &'a Message,
    /// 閲覧者が送信者か（保存されている`is_me`は使わない）
    pub is_me: bool,
}

/// 2人の間のメッセージを挿入順で返す（方向は問わない）
pub fn between<'a>(messages: &'a [Message], a: &str, b: &str) -> Vec<&'a Message> {
    messages
        .iter()
        .filter(|m| (m.sender_id == a && m.receiver_id == b) || (m.sender_id == b && m.receiver_id == a))
        .collect()
}

/// 閲覧者視点の会話
pub fn conversation<'a>(messages: &'a [Message], viewer: &User, partner: &User) -> Vec<ChatLine<'a>> {
    between(messages, &viewer.id, &partner.id)
        .into_iter()
        .map(|message| ChatLine {
            message,
            is_me: message.sender_id == viewer.id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: &str, from: &str, to: &str, is_me: bool) -> Message {
        Message {
            id: id.to_string(),
            sender_id: from.to_string(),
            receiver_id: to.to_string(),
            sender_name: String::new(),
            sender_avatar: String::new(),
            text: format!("text {}", id),
            time: String::new(),
            is_me,
        }
    }

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            avatar: String::new(),
        }
    }

    #[test]
    fn test_between_filters_pair_in_order() {
        let messages = vec![
            msg("1", "a", "b", true),
            msg("2", "a", "c", true),
            msg("3", "b", "a", true),
            msg("4", "c", "b", true),
            msg("5", "a", "b", true),
        ];

        let ids: Vec<_> = between(&messages, "a", "b").into_iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "5"]);

        // 引数の順序は関係ない
        let ids: Vec<_> = between(&messages, "b", "a").into_iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "5"]);
    }

    #[test]
    fn test_conversation_recomputes_is_me() {
        // 保存値はどちらもtrue
        let messages = vec![msg("1", "a", "b", true), msg("2", "b", "a", true)];

        let lines = conversation(&messages, &user("a"), &user("b"));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].is_me);
        assert!(!lines[1].is_me);

        let lines = conversation(&messages, &user("b"), &user("a"));
        assert!(!lines[0].is_me);
        assert!(lines[1].is_me);
    }

    #[test]
    fn test_conversation_empty() {
        let messages = vec![msg("1", "a", "c", false)];
        assert!(conversation(&messages, &user("a"), &user("b")).is_empty());
    }
}
