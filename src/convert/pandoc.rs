use super::{ContentFormat, ConvertError, ConvertResult, Converter};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Converts between Markdown, MediaWiki and HTML by running `pandoc`
#[derive(Debug, Clone)]
pub struct PandocConverter {
    program: PathBuf,
}

impl PandocConverter {
    /// Uses `pandoc` from `PATH`
    pub fn new() -> Self {
        Self::with_program("pandoc")
    }

    /// Uses a specific pandoc executable
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PandocConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for PandocConverter {
    fn can_convert(&self, from: ContentFormat, to: ContentFormat) -> bool {
        from != to && from.pandoc_name().is_some() && to.pandoc_name().is_some()
    }

    fn convert(
        &self,
        content: &str,
        from: ContentFormat,
        to: ContentFormat,
    ) -> ConvertResult<String> {
        let (Some(from_name), Some(to_name)) = (from.pandoc_name(), to.pandoc_name()) else {
            return Err(ConvertError::Unsupported { from, to });
        };

        let mut child = Command::new(&self.program)
            .args(["-f", from_name, "-t", to_name])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ConvertError::ConverterMissing {
                    program: self.program.display().to_string(),
                },
                _ => ConvertError::Io(e),
            })?;

        // stdin is written on its own thread while stdout is drained here
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ConvertError::Io(std::io::Error::other("pandoc stdin unavailable")))?;
        let input = content.to_string();
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        match writer.join() {
            Ok(result) => result?,
            Err(_) => {
                return Err(ConvertError::Failed {
                    from,
                    to,
                    message: "stdin writer panicked".to_string(),
                })
            }
        }

        if !output.status.success() {
            return Err(ConvertError::Failed {
                from,
                to,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| ConvertError::Failed {
            from,
            to,
            message: format!("output is not UTF-8: {}", e),
        })
    }
}
