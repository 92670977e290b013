use std::borrow::Cow;

/// A specialized [`CoursesError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum CoursesError {
    /// Request payload or parameters violate the declared contract.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A wrapper for storage failures surfaced by the repository.
    #[error("Storage error{}: {source}", format_context(.context))]
    Storage {
        #[source]
        source: sqlx::Error,
        context: Option<Cow<'static, str>>,
    },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal feature error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CoursesError {
    fn with_context(mut self, ctx: Cow<'static, str>) -> Self {
        let slot = match &mut self {
            Self::Validation { context, .. }
            | Self::Storage { context, .. }
            | Self::Internal { context, .. } => context,
        };
        *slot = Some(ctx);
        self
    }
}

impl From<sqlx::Error> for CoursesError {
    fn from(source: sqlx::Error) -> Self {
        Self::Storage { source, context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> String {
    context.as_ref().map_or_else(String::new, |ctx| format!(" ({ctx})"))
}

/// Adds `.context(...)` to any `Result` that converts into [`CoursesError`].
pub trait CoursesErrorExt<T> {
    /// Attaches context to the error, replacing any previous context.
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, CoursesError>;
}

impl<T, E: Into<CoursesError>> CoursesErrorExt<T> for Result<T, E> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, CoursesError> {
        self.map_err(|e| e.into().with_context(context.into()))
    }
}

/// Validation errors answer with their message; everything else stays in the
/// logs and maps onto a generic server error.
#[cfg(feature = "server")]
impl From<CoursesError> for chub_kernel::server::ApiError {
    fn from(err: CoursesError) -> Self {
        match err {
            CoursesError::Validation { message, .. } => Self::validation(message),
            other => Self::internal(other.to_string()),
        }
    }
}
