use std::borrow::Cow;

/// A specialized [`LoggerError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Invalid builder settings.
    #[error("Invalid logger configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Rolling file appender construction failures.
    #[error("Log appender error{}: {source}", format_context(.context))]
    Appender {
        #[source]
        source: tracing_appender::rolling::InitError,
        context: Option<Cow<'static, str>>,
    },

    /// Occurs when a global subscriber has already been installed.
    #[error("Subscriber error{}: {source}", format_context(.context))]
    Subscriber {
        #[source]
        source: tracing_subscriber::util::TryInitError,
        context: Option<Cow<'static, str>>,
    },

    /// Internal fallback for unexpected issues.
    #[error("Internal logger error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl LoggerError {
    fn with_context(mut self, ctx: Cow<'static, str>) -> Self {
        let slot = match &mut self {
            Self::InvalidConfiguration { context, .. }
            | Self::Appender { context, .. }
            | Self::Subscriber { context, .. }
            | Self::Internal { context, .. } => context,
        };
        *slot = Some(ctx);
        self
    }
}

impl From<tracing_appender::rolling::InitError> for LoggerError {
    fn from(source: tracing_appender::rolling::InitError) -> Self {
        Self::Appender { source, context: None }
    }
}

impl From<tracing_subscriber::util::TryInitError> for LoggerError {
    fn from(source: tracing_subscriber::util::TryInitError) -> Self {
        Self::Subscriber { source, context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> String {
    context.as_ref().map_or_else(String::new, |ctx| format!(" ({ctx})"))
}

/// Adds `.context(...)` to any `Result` that converts into [`LoggerError`].
pub trait LoggerErrorExt<T> {
    /// Attaches context to the error, replacing any previous context.
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, LoggerError>;
}

impl<T, E: Into<LoggerError>> LoggerErrorExt<T> for Result<T, E> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, LoggerError> {
        self.map_err(|e| e.into().with_context(context.into()))
    }
}
