use crate::cli::Calculator;
use crate::core::controller::{CumulativeForm, SemesterForm};
use crate::core::error::CalcError;
use crate::core::model::{ResizePolicy, SemesterResult, Subject, SubjectField};
use crate::core::report::{self, JsonReport};
use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};
use tracing::debug;

const SEMESTER_HELP: &str = "\
commands:
  subjects N               set the number of subjects
  set I FIELD [VALUE]      set subject I's registered or gained credits
  compute                  calculate the semester GPA
  show                     print the current entries
  help | quit";

const CUMULATIVE_HELP: &str = "\
commands:
  semesters N              set the number of semesters
  subjects S N             set the number of subjects in semester S
  set S I FIELD [VALUE]    set subject I of semester S
  sgpa S                   calculate the GPA of semester S only
  compute                  calculate every SGPA and the cumulative GPA
  show                     print the current entries
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SemesterCount(usize),
    SubjectCount {
        semester: Option<usize>,
        count: usize,
    },
    SetField {
        semester: Option<usize>,
        subject: usize,
        field: SubjectField,
        raw: String,
    },
    ComputeSemester(usize),
    Compute,
    Show,
    Help,
    Quit,
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str, calculator: Calculator) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let cumulative = calculator == Calculator::Cumulative;

    let command = match (tokens[0].to_ascii_lowercase().as_str(), &tokens[1..]) {
        ("semesters", [count]) if cumulative => Command::SemesterCount(parse_count(count)?),
        ("subjects", [count]) if !cumulative => Command::SubjectCount {
            semester: None,
            count: parse_count(count)?,
        },
        ("subjects", [semester, count]) if cumulative => Command::SubjectCount {
            semester: Some(parse_position(semester)?),
            count: parse_count(count)?,
        },
        ("set", [subject, field, ..]) if !cumulative => Command::SetField {
            semester: None,
            subject: parse_position(subject)?,
            field: field.parse()?,
            raw: rest_after_tokens(line, 3).to_string(),
        },
        ("set", [semester, subject, field, ..]) if cumulative => Command::SetField {
            semester: Some(parse_position(semester)?),
            subject: parse_position(subject)?,
            field: field.parse()?,
            raw: rest_after_tokens(line, 4).to_string(),
        },
        ("sgpa", [semester]) if cumulative => {
            Command::ComputeSemester(parse_position(semester)?)
        }
        ("compute" | "calculate", []) => Command::Compute,
        ("show", []) => Command::Show,
        ("help" | "?", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        (name, _) => bail!("unrecognized command `{}` (type `help`)", name),
    };

    Ok(Some(command))
}

/// The line after its first `count` words, with inner spacing left as typed.
fn rest_after_tokens(line: &str, count: usize) -> &str {
    let mut rest = line;
    for _ in 0..count {
        rest = rest.trim_start();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = &rest[end..];
    }
    rest.trim_start()
}

fn parse_count(raw: &str) -> Result<usize, CalcError> {
    raw.parse::<usize>().map_err(|_| CalcError::InvalidCount {
        raw: raw.to_string(),
    })
}

fn parse_position(raw: &str) -> Result<usize> {
    let position = raw
        .parse::<usize>()
        .with_context(|| format!("invalid index {raw:?}"))?;
    match position.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("indices start at 1"),
    }
}

pub struct Shell {
    calculator: Calculator,
    policy: ResizePolicy,
    precision: u8,
    semester: SemesterForm,
    cumulative: CumulativeForm,
}

impl Shell {
    pub fn new(calculator: Calculator, policy: ResizePolicy, precision: u8) -> Self {
        Self {
            calculator,
            policy,
            precision,
            semester: SemesterForm::new(),
            cumulative: CumulativeForm::new(),
        }
    }

    /// Runs commands until `quit` or end of input. Bad commands are reported and skipped.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, out: &mut W) -> Result<()> {
        for line in reader.lines() {
            let line = line.context("failed reading shell input")?;
            let command = match parse_command(&line, self.calculator) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    writeln!(out, "error: {err:#}")?;
                    continue;
                }
            };

            debug!(?command, "shell command");
            if command == Command::Quit {
                break;
            }
            if let Err(err) = self.apply(command, out) {
                writeln!(out, "error: {err:#}")?;
            }
        }

        Ok(())
    }

    pub fn apply<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        match command {
            Command::SemesterCount(count) => {
                self.cumulative = self.cumulative.with_semester_count(count, self.policy);
            }
            Command::SubjectCount {
                semester: None,
                count,
            } => {
                self.semester = self.semester.with_subject_count(count, self.policy);
            }
            Command::SubjectCount {
                semester: Some(semester),
                count,
            } => {
                self.cumulative =
                    self.cumulative
                        .with_semester_subject_count(semester, count, self.policy)?;
            }
            Command::SetField {
                semester: None,
                subject,
                field,
                raw,
            } => {
                self.semester = self.semester.with_subject_field(subject, field, raw)?;
            }
            Command::SetField {
                semester: Some(semester),
                subject,
                field,
                raw,
            } => {
                self.cumulative =
                    self.cumulative
                        .with_semester_subject_field(semester, subject, field, raw)?;
            }
            Command::ComputeSemester(semester) => {
                self.cumulative = self.cumulative.with_semester_computed(semester)?;
                if let Some(result) = self.cumulative.semester(semester)?.result {
                    writeln!(
                        out,
                        "SGPA for Semester {}: {}",
                        semester + 1,
                        report::format_gpa(result.sgpa, self.precision)
                    )?;
                }
            }
            Command::Compute => self.compute(out)?,
            Command::Show => self.show(out)?,
            Command::Help => {
                let help = match self.calculator {
                    Calculator::Semester => SEMESTER_HELP,
                    Calculator::Cumulative => CUMULATIVE_HELP,
                };
                writeln!(out, "{help}")?;
            }
            Command::Quit => {}
        }

        Ok(())
    }

    fn compute<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let json_report = match self.calculator {
            Calculator::Semester => {
                self.semester = self.semester.computed();
                let result = self
                    .semester
                    .result()
                    .context("semester result missing after compute")?;
                JsonReport::semester(&result, self.precision)
            }
            Calculator::Cumulative => {
                self.cumulative = self.cumulative.computed();
                let result = self
                    .cumulative
                    .result
                    .as_ref()
                    .context("cumulative result missing after compute")?;
                JsonReport::cumulative(result, &[], self.precision)
            }
        };

        writeln!(out, "{}", report::render_human(&json_report))?;
        Ok(())
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<()> {
        match self.calculator {
            Calculator::Semester => {
                write_semester(
                    out,
                    self.semester.subjects(),
                    self.semester.result(),
                    "",
                    self.precision,
                )?;
            }
            Calculator::Cumulative => {
                if self.cumulative.semesters.is_empty() {
                    writeln!(out, "no semesters (use `semesters N`)")?;
                }
                for (idx, semester) in self.cumulative.semesters.iter().enumerate() {
                    writeln!(out, "Semester {}", idx + 1)?;
                    write_semester(
                        out,
                        &semester.subjects,
                        semester.result,
                        "  ",
                        self.precision,
                    )?;
                }
                if let Some(result) = &self.cumulative.result {
                    writeln!(
                        out,
                        "CGPA: {}",
                        report::format_gpa(result.cgpa, self.precision)
                    )?;
                }
            }
        }

        Ok(())
    }
}

fn write_semester<W: Write>(
    out: &mut W,
    subjects: &[Subject],
    result: Option<SemesterResult>,
    indent: &str,
    precision: u8,
) -> Result<()> {
    if subjects.is_empty() {
        writeln!(out, "{indent}no subjects (use `subjects`)")?;
    }
    for (idx, subject) in subjects.iter().enumerate() {
        writeln!(
            out,
            "{indent}Subject {}: registered={:?} gained={:?}",
            idx + 1,
            subject.registered_credits,
            subject.gained_credits
        )?;
    }
    if let Some(result) = result {
        writeln!(
            out,
            "{indent}SGPA: {}",
            report::format_gpa(result.sgpa, precision)
        )?;
    }
    Ok(())
}
