use std::{collections::BTreeMap, fmt, io, sync::Arc};

#[derive(Debug, Clone)]
pub struct SignError {
    pub key: &'static str,
    pub args: BTreeMap<&'static str, String>,
    pub causes: Vec<SignCause>,
}

#[derive(Debug, Clone)]
pub enum SignCause {
    Sign(Box<SignError>),
    Std(Arc<dyn std::error::Error + Send + Sync>),
}

impl SignError {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            args: BTreeMap::new(),
            causes: Vec::new(),
        }
    }

    pub fn with_arg(mut self, k: &'static str, v: impl ToString) -> Self {
        self.args.insert(k, v.to_string());
        self
    }

    /// Wrap this error under a new key, keeping it as the first cause.
    pub fn context(self, key: &'static str) -> Self {
        SignError::new(key).push_sign(self)
    }

    pub fn push_sign(mut self, cause: SignError) -> Self {
        self.causes.push(SignCause::Sign(Box::new(cause)));
        self
    }

    pub fn push_std(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.causes.push(SignCause::Std(Arc::new(cause)));
        self
    }
}

impl fmt::Display for SignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.key)?;
        let mut first = true;
        for (k, v) in &self.args {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{k}={v}")?;
        }
        write!(f, ")")?;
        for cause in &self.causes {
            match cause {
                SignCause::Sign(e) => write!(f, ": {e}")?,
                SignCause::Std(e) => write!(f, ": {e}")?,
            }
        }
        Ok(())
    }
}

impl std::error::Error for SignError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes.iter().find_map(|c| match c {
            SignCause::Sign(e) => Some(e.as_ref() as &dyn std::error::Error),
            SignCause::Std(e) => Some(e.as_ref() as &dyn std::error::Error),
        })
    }
}

impl From<io::Error> for SignError {
    fn from(err: io::Error) -> Self {
        SignError::new("io-error").push_std(err)
    }
}

impl From<reqwest::Error> for SignError {
    fn from(err: reqwest::Error) -> Self {
        SignError::new("reqwest::Error").push_std(err)
    }
}

impl From<gltf::Error> for SignError {
    fn from(err: gltf::Error) -> Self {
        SignError::new("gltf::Error").push_std(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_args_in_order_then_causes() {
        let err = SignError::new("glb-header")
            .with_arg("version", 1)
            .with_arg("expected", 2)
            .context("clip-load");

        assert_eq!(err.to_string(), "clip-load(): glb-header(expected=2, version=1)");
    }

    #[test]
    fn io_errors_are_kept_as_source() {
        let err: SignError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err.key, "io-error");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("missing"));
    }
}
