use std::fmt;

/// The kinds of entity that receive engine-assigned ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Client,
    Credit,
    Transaction,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Client,
        EntityKind::Credit,
        EntityKind::Transaction,
    ];

    /// Id prefix, e.g. `cli` for `cli7`.
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Client => "cli",
            EntityKind::Credit => "cre",
            EntityKind::Transaction => "trans",
        }
    }

    pub fn format_id(&self, n: u64) -> String {
        format!("{}{}", self.prefix(), n)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Client => "client",
            EntityKind::Credit => "credit",
            EntityKind::Transaction => "transaction",
        };
        f.write_str(name)
    }
}
