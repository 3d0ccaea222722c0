use crate::config::{Config, OutputFormat};
use crate::Command;
use anyhow::{Context, Result};
use intentguide_corpus::{Corpus, CorpusLocator};
use intentguide_routing::{
    checklist, render_system_prompt, ChecklistKind, DocumentRef, RoutingTable, Topic,
};
use serde::Serialize;
use std::io::Write;
use std::process::ExitCode;
use tracing::{debug, info};

/// Exit code when a topic has no routing entry
const EXIT_NOT_ROUTED: u8 = 2;

#[derive(Debug, Serialize)]
struct TopicView {
    id: Topic,
    summary: &'static str,
}

#[derive(Debug, Serialize)]
struct DocView {
    id: DocumentRef,
    description: &'static str,
}

impl From<&DocumentRef> for DocView {
    fn from(doc: &DocumentRef) -> Self {
        Self {
            id: *doc,
            description: doc.description(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum LookupView {
    Routed {
        topic: Topic,
        documents: Vec<DocView>,
    },
    Unrouted {
        error: String,
        fallback: Vec<DocView>,
    },
}

#[derive(Debug, Serialize)]
struct VerifyView {
    table_ok: bool,
    table_error: Option<String>,
    corpus: Option<String>,
    present: Vec<DocumentRef>,
    missing: Vec<DocumentRef>,
    mismatches: Vec<String>,
}

/// Answers CLI requests against the routing table and the corpus
pub struct GuideService {
    config: Config,
    table: &'static RoutingTable,
}

impl GuideService {
    /// Create a new guide service over the builtin routing table
    pub fn new(config: Config) -> Self {
        Self {
            config,
            table: RoutingTable::builtin(),
        }
    }

    fn json(&self) -> bool {
        self.config.output.format == OutputFormat::Json
    }

    /// Locate and open the corpus: configured path first, then skill installs
    fn open_corpus(&self) -> Result<Corpus> {
        let locator = CorpusLocator::new()
            .add_directory(&self.config.corpus.path)
            .with_project_skills()
            .with_personal_skills();

        let root = locator.locate().with_context(|| {
            format!(
                "No corpus found (searched {:?}); set INTENTGUIDE_CORPUS",
                locator.directories()
            )
        })?;

        Corpus::open(root)
    }

    /// Run a single command, writing its output to `out` and diagnostics to
    /// `err`
    pub fn run(
        &self,
        command: &Command,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> Result<ExitCode> {
        debug!("Running {:?}", command);

        match command {
            Command::Topics => self.topics(out),
            Command::Docs => self.docs(out),
            Command::Lookup { topic } => self.lookup(topic, out, err),
            Command::Show { doc } => self.show(doc, out),
            Command::Checklist { kind } => self.checklist(kind, out),
            Command::Prompt => {
                write!(out, "{}", render_system_prompt(self.table))?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Verify => self.verify(out),
        }
    }

    fn topics(&self, out: &mut impl Write) -> Result<ExitCode> {
        let views: Vec<_> = self
            .table
            .topics()
            .map(|id| TopicView {
                id,
                summary: id.summary(),
            })
            .collect();

        if self.json() {
            serde_json::to_writer_pretty(&mut *out, &views)?;
            writeln!(out)?;
        } else {
            for view in views {
                writeln!(out, "{:<28} {}", view.id, view.summary)?;
            }
        }
        Ok(ExitCode::SUCCESS)
    }

    fn docs(&self, out: &mut impl Write) -> Result<ExitCode> {
        let views: Vec<DocView> = self.table.all_documents().iter().map(Into::into).collect();

        if self.json() {
            serde_json::to_writer_pretty(&mut *out, &views)?;
            writeln!(out)?;
        } else {
            for view in views {
                writeln!(out, "{:<28} {}", view.id, view.description)?;
            }
        }
        Ok(ExitCode::SUCCESS)
    }

    fn lookup(
        &self,
        topic: &str,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> Result<ExitCode> {
        let (view, code) = match self.table.lookup(topic) {
            Ok(docs) => {
                info!("Topic '{}' routed to {} document(s)", topic, docs.len());
                let view = LookupView::Routed {
                    topic: topic.parse()?,
                    documents: docs.iter().map(Into::into).collect(),
                };
                (view, ExitCode::SUCCESS)
            }
            Err(e) => {
                let view = LookupView::Unrouted {
                    error: e.to_string(),
                    fallback: self.table.all_documents().iter().map(Into::into).collect(),
                };
                (view, ExitCode::from(EXIT_NOT_ROUTED))
            }
        };

        if self.json() {
            serde_json::to_writer_pretty(&mut *out, &view)?;
            writeln!(out)?;
            return Ok(code);
        }

        match view {
            LookupView::Routed { documents, .. } => {
                for (i, doc) in documents.iter().enumerate() {
                    writeln!(out, "{}. {:<28} {}", i + 1, doc.id, doc.description)?;
                }
            }
            LookupView::Unrouted { error, fallback } => {
                writeln!(err, "{error}")?;
                writeln!(err, "No specific routing guidance available. Reference documents:")?;
                for doc in fallback {
                    writeln!(out, "- {:<28} {}", doc.id, doc.description)?;
                }
            }
        }
        Ok(code)
    }

    fn show(&self, doc: &str, out: &mut impl Write) -> Result<ExitCode> {
        let doc: DocumentRef = doc.parse()?;
        let mut corpus = self.open_corpus()?;
        let content = corpus.load(doc)?;
        out.write_all(content.as_bytes())?;
        Ok(ExitCode::SUCCESS)
    }

    fn checklist(&self, kind: &str, out: &mut impl Write) -> Result<ExitCode> {
        let list = checklist(kind.parse::<ChecklistKind>()?);

        if self.json() {
            serde_json::to_writer_pretty(&mut *out, list)?;
            writeln!(out)?;
        } else {
            write!(out, "{}", list.to_markdown())?;
        }
        Ok(ExitCode::SUCCESS)
    }

    fn verify(&self, out: &mut impl Write) -> Result<ExitCode> {
        let table_error = self.table.check_integrity().err().map(|e| e.to_string());

        let (corpus, report) = match self.open_corpus() {
            Ok(corpus) => {
                let report = corpus.verify(self.table);
                (Some(corpus.root().display().to_string()), Some(report))
            }
            Err(e) => {
                debug!("Corpus unavailable: {:#}", e);
                (None, None)
            }
        };

        let ok = table_error.is_none() && report.as_ref().is_some_and(|r| r.is_ok());
        let view = VerifyView {
            table_ok: table_error.is_none(),
            table_error,
            corpus,
            present: report
                .as_ref()
                .map(|r| r.present.iter().copied().collect())
                .unwrap_or_default(),
            missing: report
                .as_ref()
                .map(|r| r.missing.iter().copied().collect())
                .unwrap_or_default(),
            mismatches: report.map(|r| r.mismatches).unwrap_or_default(),
        };

        if self.json() {
            serde_json::to_writer_pretty(&mut *out, &view)?;
            writeln!(out)?;
        } else {
            match &view.table_error {
                None => writeln!(out, "routing table: ok ({} topics)", self.table.len())?,
                Some(e) => writeln!(out, "routing table: {e}")?,
            }
            match &view.corpus {
                Some(root) => writeln!(
                    out,
                    "corpus: {root} ({} present, {} missing)",
                    view.present.len(),
                    view.missing.len()
                )?,
                None => writeln!(out, "corpus: not found")?,
            }
            for doc in &view.missing {
                writeln!(out, "missing: references/{}", doc.file_name())?;
            }
            for mismatch in &view.mismatches {
                writeln!(out, "mismatch: {mismatch}")?;
            }
        }

        Ok(if ok {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn service(format: OutputFormat) -> GuideService {
        let mut config = Config::default();
        config.corpus.path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../corpus");
        config.output.format = format;
        GuideService::new(config)
    }

    fn run_split(service: &GuideService, command: Command) -> (ExitCode, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = service.run(&command, &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn run(service: &GuideService, command: Command) -> (ExitCode, String) {
        let (code, out, _) = run_split(service, command);
        (code, out)
    }

    #[test]
    fn test_lookup_text() {
        let (code, out) = run(
            &service(OutputFormat::Text),
            Command::Lookup {
                topic: "first-intent".into(),
            },
        );
        assert_eq!(code, ExitCode::SUCCESS);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1. intent-fundamentals"));
        assert!(lines[1].starts_with("2. shortcuts-provider"));
    }

    #[test]
    fn test_lookup_unknown_falls_back_to_catalogue() {
        let (code, out) = run(
            &service(OutputFormat::Json),
            Command::Lookup {
                topic: "nonexistent-topic".into(),
            },
        );
        assert_eq!(code, ExitCode::from(EXIT_NOT_ROUTED));

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["error"], "Topic 'nonexistent-topic' not recognized");
        assert_eq!(value["fallback"].as_array().unwrap().len(), 11);
    }

    #[test]
    fn test_lookup_json() {
        let (_, out) = run(
            &service(OutputFormat::Json),
            Command::Lookup {
                topic: "searchable-content".into(),
            },
        );
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["topic"], "searchable-content");
        let ids: Vec<_> = value["documents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["id"].as_str().unwrap())
            .collect();
        assert_eq!(
            ids,
            ["entities-and-queries", "spotlight-indexing", "siri-integration"]
        );
    }

    #[test]
    fn test_topics_lists_all() {
        let (_, out) = run(&service(OutputFormat::Text), Command::Topics);
        assert_eq!(out.lines().count(), 10);
        assert!(out.starts_with("first-intent"));
    }

    #[test]
    fn test_text_output_is_aligned() {
        let (_, out) = run(&service(OutputFormat::Text), Command::Topics);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines[0],
            format!("{:<28} {}", "first-intent", "Create your first App Intent")
        );
        assert_eq!(&lines[0][..29], "first-intent                 ");
        for line in &lines {
            assert_eq!(line.chars().nth(28), Some(' '), "{line}");
            assert_ne!(line.chars().nth(29), Some(' '), "{line}");
        }

        let (_, out) = run(&service(OutputFormat::Text), Command::Docs);
        for line in out.lines() {
            assert_eq!(line.chars().nth(28), Some(' '), "{line}");
            assert_ne!(line.chars().nth(29), Some(' '), "{line}");
        }
    }

    #[test]
    fn test_lookup_unknown_text_splits_streams() {
        let (code, out, err) = run_split(
            &service(OutputFormat::Text),
            Command::Lookup {
                topic: "nonexistent-topic".into(),
            },
        );
        assert_eq!(code, ExitCode::from(EXIT_NOT_ROUTED));
        assert_eq!(
            err,
            "Topic 'nonexistent-topic' not recognized\n\
             No specific routing guidance available. Reference documents:\n"
        );
        assert_eq!(out.lines().count(), 11);
        assert!(out.lines().all(|l| l.starts_with("- ")));
    }

    #[test]
    fn test_verify_json_shape() {
        let (code, out) = run(&service(OutputFormat::Json), Command::Verify);
        assert_eq!(code, ExitCode::SUCCESS, "{out}");

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["table_ok"], true);
        assert!(value["table_error"].is_null());
        assert_eq!(value["missing"].as_array().unwrap().len(), 0);
        assert_eq!(value["mismatches"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_show_reads_corpus() {
        let (code, out) = run(
            &service(OutputFormat::Text),
            Command::Show {
                doc: "intent-fundamentals".into(),
            },
        );
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(out.starts_with("# "));
    }

    #[test]
    fn test_show_unknown_document() {
        let mut out = Vec::new();
        let err = service(OutputFormat::Text)
            .run(
                &Command::Show {
                    doc: "swiftui".into(),
                },
                &mut out,
                &mut Vec::new(),
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "Document 'swiftui' not recognized");
    }

    #[test]
    fn test_checklist_json() {
        let (_, out) = run(
            &service(OutputFormat::Json),
            Command::Checklist {
                kind: "app-entity".into(),
            },
        );
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["kind"], "app-entity");
        assert_eq!(value["title"], "Minimum viable App Entity");
    }

    #[test]
    fn test_verify_bundled_corpus() {
        let (code, out) = run(&service(OutputFormat::Text), Command::Verify);
        assert_eq!(code, ExitCode::SUCCESS, "{out}");
        assert!(out.contains("routing table: ok (10 topics)"));
        assert!(out.contains("(11 present, 0 missing)"));
    }

    #[test]
    fn test_prompt_contains_routing() {
        let (_, out) = run(&service(OutputFormat::Text), Command::Prompt);
        assert!(out.contains("## Task-based routing"));
        assert!(out.contains("## Reference files"));
    }
}
