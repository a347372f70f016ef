//! Request/response loop over a byte stream.

use std::io;
use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::observability::metrics;
use crate::protocol::request::{Delimiter, Request};
use crate::protocol::response::Response;
use crate::ruleset::{RuleSetCache, RuleSetManager};

/// Default cap on a single request line.
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;

/// Problems with a raw line before it can be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("line exceeds {max} bytes")]
    TooLong { max: usize },

    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

/// Decides which rule set answers a line.
#[derive(Debug, Clone)]
pub enum Resolver {
    /// Each line names its rule set: `<name><delim><value>`.
    PerLine {
        cache: Arc<RuleSetCache>,
        delimiter: Delimiter,
    },
    /// Every line is a bare value for one rule set.
    Fixed(Arc<RuleSetManager>),
}

impl Resolver {
    /// Answer one decoded line (without its line terminator).
    pub fn respond(&self, line: &str) -> Response {
        match self {
            Resolver::PerLine { cache, delimiter } => {
                let request = match Request::parse(line, *delimiter) {
                    Ok(request) => request,
                    Err(e) => {
                        tracing::warn!(input = %line, error = %e, "Invalid request");
                        metrics::record_rejected("request");
                        return Response::Null;
                    }
                };

                let manager = match cache.manager_for(request.rule_set) {
                    Ok(manager) => manager,
                    Err(e) => {
                        tracing::warn!(rule_set = %request.rule_set, error = %e, "Rejecting rule set");
                        metrics::record_rejected("name");
                        return Response::Null;
                    }
                };

                lookup(&manager, request.value)
            }
            Resolver::Fixed(manager) => {
                if line.is_empty() {
                    return Response::Null;
                }
                lookup(manager, line)
            }
        }
    }
}

fn lookup(manager: &RuleSetManager, value: &str) -> Response {
    manager.reload_if_needed();
    let response = Response::from(manager.matches(value));
    tracing::debug!(rule_set = %manager.name(), value = %value, response = %response, "Lookup");
    metrics::record_lookup(response);
    response
}

/// Counters for one finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub lines: u64,
    pub found: u64,
    pub null: u64,
}

/// Serves one input stream until EOF.
#[derive(Debug, Clone)]
pub struct Session {
    resolver: Resolver,
    max_line_bytes: usize,
}

impl Session {
    pub fn new(resolver: Resolver, max_line_bytes: usize) -> Self {
        Self {
            resolver,
            max_line_bytes,
        }
    }

    /// Read lines from `reader` and write one flushed token per line to `writer`.
    pub async fn run<R, W>(&self, mut reader: R, mut writer: W) -> io::Result<SessionSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut summary = SessionSummary::default();
        let mut buf = Vec::new();

        loop {
            let line = match self.read_line(&mut reader, &mut buf).await? {
                None => break,
                Some(line) => line,
            };

            let response = match line {
                Ok(line) => self.resolver.respond(line),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding input line");
                    metrics::record_rejected("line");
                    Response::Null
                }
            };

            writer.write_all(response.as_str().as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;

            summary.lines += 1;
            if response.is_found() {
                summary.found += 1;
            } else {
                summary.null += 1;
            }
        }

        tracing::info!(
            lines = summary.lines,
            found = summary.found,
            null = summary.null,
            "Input closed"
        );
        Ok(summary)
    }

    /// Read one line into `buf`. `None` at EOF.
    async fn read_line<'b, R>(
        &self,
        reader: &mut R,
        buf: &'b mut Vec<u8>,
    ) -> io::Result<Option<Result<&'b str, LineError>>>
    where
        R: AsyncBufRead + Unpin,
    {
        buf.clear();
        // Room for the content plus a CRLF terminator.
        let limit = self.max_line_bytes as u64 + 2;
        let read = (&mut *reader).take(limit).read_until(b'\n', buf).await?;
        if read == 0 {
            return Ok(None);
        }

        let terminated = buf.last() == Some(&b'\n');
        if terminated {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        if buf.len() > self.max_line_bytes {
            if !terminated {
                discard_line(reader).await?;
            }
            return Ok(Some(Err(LineError::TooLong {
                max: self.max_line_bytes,
            })));
        }

        Ok(Some(
            std::str::from_utf8(buf).map_err(|_| LineError::InvalidUtf8),
        ))
    }
}

/// Skip input up to and including the next newline.
async fn discard_line<R>(reader: &mut R) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let (used, done) = {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|b| *b == b'\n') {
                Some(i) => (i + 1, true),
                None => (available.len(), false),
            }
        };
        reader.consume(used);
        if done {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn per_line(dir: &TempDir, delimiter: Delimiter) -> Session {
        let resolver = Resolver::PerLine {
            cache: Arc::new(RuleSetCache::new(dir.path())),
            delimiter,
        };
        Session::new(resolver, DEFAULT_MAX_LINE_BYTES)
    }

    async fn run(session: &Session, input: &[u8]) -> (String, SessionSummary) {
        let mut output = Vec::new();
        let summary = session.run(input, &mut output).await.unwrap();
        (String::from_utf8(output).unwrap(), summary)
    }

    #[tokio::test]
    async fn one_token_per_line() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("users.list"), "alice\n").unwrap();
        let session = per_line(&dir, Delimiter::Whitespace);

        let (out, summary) = run(&session, b"users.list alice\nusers.list bob\n\nbad\n../x.list y\n").await;
        assert_eq!(out, "FOUND\nNULL\nNULL\nNULL\nNULL\n");
        assert_eq!(
            summary,
            SessionSummary {
                lines: 5,
                found: 1,
                null: 4
            }
        );
    }

    #[tokio::test]
    async fn crlf_and_missing_final_newline() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("users.list"), "alice\n").unwrap();
        let session = per_line(&dir, Delimiter::Char(';'));

        let (out, _) = run(&session, b"users.list;alice\r\nusers.list;alice").await;
        assert_eq!(out, "FOUND\nFOUND\n");
    }

    #[tokio::test]
    async fn overlong_and_invalid_lines_answer_null() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("users.list"), "alice\n").unwrap();
        let resolver = Resolver::PerLine {
            cache: Arc::new(RuleSetCache::new(dir.path())),
            delimiter: Delimiter::Whitespace,
        };
        let session = Session::new(resolver, 16);

        let mut input = Vec::new();
        input.extend_from_slice(b"users.list alice\n");
        input.extend_from_slice(b"users.list aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\n");
        input.extend_from_slice(b"users.list \xff\n");
        input.extend_from_slice(b"users.list alice\n");

        let (out, summary) = run(&session, &input).await;
        assert_eq!(out, "FOUND\nNULL\nNULL\nFOUND\n");
        assert_eq!(summary.lines, 4);
    }

    #[tokio::test]
    async fn limit_applies_to_content_not_terminator() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("users.list"), "alice\n").unwrap();
        let resolver = Resolver::PerLine {
            cache: Arc::new(RuleSetCache::new(dir.path())),
            delimiter: Delimiter::Whitespace,
        };
        // "users.list alice" is exactly 16 bytes.
        let session = Session::new(resolver, 16);

        let (out, _) = run(
            &session,
            b"users.list alice\r\nusers.list alice\nusers.list  alice\r\nusers.list alice",
        )
        .await;
        assert_eq!(out, "FOUND\nFOUND\nNULL\nFOUND\n");
    }

    #[tokio::test]
    async fn fixed_resolver_uses_bare_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agents.ri.list");
        fs::write(&path, "bot\n").unwrap();
        let manager = Arc::new(RuleSetManager::new(
            "agents.ri.list",
            path,
            crate::rules::MatchMode::RegexCaseInsensitive,
        ));
        let session = Session::new(Resolver::Fixed(manager), DEFAULT_MAX_LINE_BYTES);

        let (out, _) = run(&session, b"Googlebot/2.1 (+http://www.google.com/bot.html)\nFirefox\n\n").await;
        assert_eq!(out, "FOUND\nNULL\nNULL\n");
    }
}
