use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Everything that can stop a comparison before the speedup is reported.
#[derive(Debug)]
pub enum Error {
    /// A collaborator reported a failure while running its workload.
    Collaborator { label: String, message: String },
    /// A child process backing a collaborator could not be started.
    Spawn { program: String, source: io::Error },
    /// Writing the report failed.
    Io(io::Error),
    /// The second measurement took no measurable time, so the ratio is undefined.
    ZeroDuration { label: String },
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collaborator { label, message } => {
                write!(f, "{} collaborator failed: {}", label, message)
            }
            Self::Spawn { program, source } => write!(f, "Unable to start `{}`: {}", program, source),
            Self::Io(err) => write!(f, "I/O error: {}", err),
            Self::ZeroDuration { label } => write!(
                f,
                "{} time was zero; speedup is undefined at this clock resolution",
                label
            ),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::Io(err) => Some(err),
            Self::Collaborator { .. } | Self::ZeroDuration { .. } => None,
        }
    }
}

pub type Result<T> = ::std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_duration_names_the_label() {
        let err = Error::ZeroDuration {
            label: "Cython".to_owned(),
        };
        assert!(err.to_string().starts_with("Cython time was zero"));
        assert!(err.source().is_none());
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert!(err.source().is_some());
    }
}
