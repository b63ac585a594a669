use std::fmt;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DawgErrorKind {
    OutOfOrder,
    PrefixOverflow,
    DanglingEdges,
    HashTableFull,
    ArenaOverflow,
    CorruptFile,
    CorruptGraph,
    Io,
    Args,
}

impl DawgErrorKind {
    pub fn with_error<E>(self, source: E) -> DawgError
    where
        anyhow::Error: From<E>,
    {
        DawgError {
            kind: self,
            source: From::from(source),
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("DawgError(kind={kind:?}, source={source})")]
pub struct DawgError {
    pub kind: DawgErrorKind,
    #[source]
    source: anyhow::Error,
}

impl DawgError {
    pub fn add_context<C>(self, ctx: C) -> Self
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        DawgError {
            kind: self.kind,
            source: self.source.context(ctx),
        }
    }

    pub fn kind(&self) -> DawgErrorKind {
        self.kind
    }
}
