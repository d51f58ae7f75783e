use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
    }

    let hints = hints_for(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

fn hints_for(err: &Error) -> Vec<String> {
    let mut hints = Hints::default();

    hints.document(err);
    hints.analysis(err);
    hints.query(err);

    if !hints.typed {
        hints.fallback(err);
    }
    hints.items
}

#[derive(Default)]
struct Hints {
    items: Vec<String>,
    typed: bool,
}

impl Hints {
    fn add(&mut self, hint: impl Into<String>) {
        self.items.push(hint.into());
    }

    fn document(&mut self, err: &Error) {
        use kinda_system::io::Error as IoError;

        let Some(io_err) = err.downcast_ref::<IoError>() else {
            return;
        };
        self.typed = true;

        match io_err {
            IoError::Io { source } => self.std_io(source),

            IoError::Json { source } => {
                self.add(format!(
                    "JSON problem at line {}, column {}",
                    source.line(),
                    source.column()
                ));
                if source.is_data() {
                    self.add("A field has the wrong type or a required field is missing");
                    self.add("Complexes need `name` and `strands`; reactions need `reactants` and `products`");
                } else {
                    self.add("The document is not valid JSON");
                }
            }

            IoError::UnknownReference { kind, .. } => {
                self.add(format!("Every {kind} must be defined before it is referenced by name"));
                self.add("Check the spelling of the name in both places");
            }

            IoError::DuplicateName { kind, .. } => {
                self.add(format!("Each {kind} name must be unique within a document"));
            }

            IoError::UnsupportedUnit { supported, .. } => {
                self.add(format!("Supported units: {supported}"));
            }
        }
    }

    fn std_io(&mut self, source: &io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }
            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }
            ErrorKind::BrokenPipe => {
                self.add("Output consumer terminated early");
                self.add("This may occur when piping to commands like `head`");
            }
            ErrorKind::UnexpectedEof => {
                self.add("Unexpected end of input; the document may be truncated");
            }
            _ => {
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn analysis(&mut self, err: &Error) {
        use kinda_system::AnalysisError;

        let Some(analysis_err) = err.downcast_ref::<AnalysisError>() else {
            return;
        };
        self.typed = true;

        match analysis_err {
            AnalysisError::ConfigParse(_) => {
                self.add("The configuration file has invalid TOML or an unknown [kinda] key");
                self.add("Known [kinda] keys: enable_unimolecular_reactions, max_concentration");
            }
            AnalysisError::Enumeration(_) => {
                self.add("The reaction enumerator failed; check the [peppercorn] settings");
            }
            AnalysisError::Statistics(_) => {
                self.add("The statistics step failed; check the --stats document");
            }
        }
    }

    fn query(&mut self, err: &Error) {
        use kinda_system::QueryError;

        let Some(query_err) = err.downcast_ref::<QueryError>() else {
            return;
        };
        self.typed = true;

        match query_err {
            QueryError::NotFound { kind, .. } => {
                let command = match *kind {
                    "complex" => "complexes",
                    "resting set" => "resting-sets",
                    _ => "reactions",
                };
                self.add(format!("List the available entries with `kinda {command}`"));
                self.add("Spurious entities are only visible with --provenance spurious or any");
            }
            QueryError::AmbiguousMatch { .. } => {
                self.add("Narrow the filters so that exactly one entity matches");
            }
        }
    }

    fn fallback(&mut self, err: &Error) {
        let text = err
            .chain()
            .map(|cause| cause.to_string())
            .collect::<Vec<_>>()
            .join("\n")
            .to_lowercase();

        if text.contains("terminal") || text.contains("stdin") {
            self.add("Provide a network via -n/--network or pipe it to stdin");
        } else if text.contains("no such file") || text.contains("not found") {
            self.add("Check that the file path is correct");
        }
    }
}
