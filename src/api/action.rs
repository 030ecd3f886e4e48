// Engagement actions and their endpoint vocabulary.

use std::str::FromStr;

/// One of the four batch engagement actions the backend can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Retweet,
    Like,
    Comment,
    Quote,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Retweet, Action::Like, Action::Comment, Action::Quote];

    /// Endpoint path on the backend.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Action::Retweet => "/retweet-posts",
            Action::Like => "/like-posts",
            Action::Comment => "/post-comments",
            Action::Quote => "/post-quote-tweets",
        }
    }

    /// Response field holding the number of successful items.
    pub fn count_field(&self) -> &'static str {
        match self {
            Action::Retweet => "retweeted_count",
            Action::Like => "liked_count",
            Action::Comment => "commented_count",
            Action::Quote => "quoted_count",
        }
    }

    /// Per-item status the backend reports on success.
    pub fn success_status(&self) -> &'static str {
        match self {
            Action::Retweet => "retweeted",
            Action::Like => "liked",
            Action::Comment => "commented",
            Action::Quote => "quoted",
        }
    }

    /// Whether the request may carry a free-text message.
    pub fn takes_message(&self) -> bool {
        matches!(self, Action::Comment | Action::Quote)
    }

    /// Past-tense verb for banners ("Liked 3 post(s)").
    pub fn verb(&self) -> &'static str {
        match self {
            Action::Retweet => "Retweeted",
            Action::Like => "Liked",
            Action::Comment => "Commented on",
            Action::Quote => "Quoted",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Retweet => "retweet",
            Action::Like => "like",
            Action::Comment => "comment",
            Action::Quote => "quote",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    /// Accepts the action name or its 1-based menu number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "retweet" | "rt" => Ok(Action::Retweet),
            "2" | "like" => Ok(Action::Like),
            "3" | "comment" | "reply" => Ok(Action::Comment),
            "4" | "quote" => Ok(Action::Quote),
            other => Err(format!("unknown action: {other}")),
        }
    }
}
