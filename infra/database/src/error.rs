use std::borrow::Cow;

/// A specialized [`DatabaseError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Validation errors.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Occurs when connectivity or the startup probe fails.
    #[error("Database connection failed{}: {message}", format_context(.context))]
    Connection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A wrapper for underlying PostgreSQL driver errors.
    #[error("PostgreSQL error{}: {source}", format_context(.context))]
    Sqlx {
        #[source]
        source: sqlx::Error,
        context: Option<Cow<'static, str>>,
    },

    /// Migration failures or invariant violations.
    #[error("Migration error{}: {source}", format_context(.context))]
    Migration {
        #[source]
        source: sqlx::migrate::MigrateError,
        context: Option<Cow<'static, str>>,
    },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal database error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl DatabaseError {
    fn with_context(mut self, ctx: Cow<'static, str>) -> Self {
        let slot = match &mut self {
            Self::Validation { context, .. }
            | Self::Connection { context, .. }
            | Self::Sqlx { context, .. }
            | Self::Migration { context, .. }
            | Self::Internal { context, .. } => context,
        };
        *slot = Some(ctx);
        self
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx { source, context: None }
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(source: sqlx::migrate::MigrateError) -> Self {
        Self::Migration { source, context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> String {
    context.as_ref().map_or_else(String::new, |ctx| format!(" ({ctx})"))
}

/// Adds `.context(...)` to any `Result` that converts into [`DatabaseError`].
pub trait DatabaseErrorExt<T> {
    /// Attaches context to the error, replacing any previous context.
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, DatabaseError>;
}

impl<T, E: Into<DatabaseError>> DatabaseErrorExt<T> for Result<T, E> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, DatabaseError> {
        self.map_err(|e| e.into().with_context(context.into()))
    }
}
