//! Purpose: Hold top-level CLI command dispatch for `monsterbuf`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Buffers read from disk are verified before any field is touched.
//! Invariants: A failed sample check surfaces as `ErrorKind::Corrupt` after its report is printed.

use std::path::Path;

use clap::CommandFactory;
use flatbuffers::FlatBufferBuilder;
use serde_json::json;

use super::*;
use monsterbuf::api::{
    BufferInfo, MappedBuffer, MonsterRecord, SampleReport, build_sample, check_sample, decode,
    encode, schema, summary_lines, write_buffer,
};

pub(super) fn dispatch_command(command: Command) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "monsterbuf", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Version => {
            emit_version_output();
            Ok(RunOutcome::ok())
        }
        Command::Demo { json } => run_demo(json),
        Command::Build {
            input,
            out,
            size_prefixed,
        } => {
            let record = match &input {
                Some(path) => read_record(path)?,
                None => MonsterRecord::sample(),
            };
            let framing = Framing::from_flag(size_prefixed);
            let bytes = encode(&record, framing);
            let info = BufferInfo::describe(&bytes, framing);

            match out {
                Some(path) => {
                    write_buffer(&path, &bytes)?;
                    emit_json(json!({
                        "path": path.display().to_string(),
                        "buffer": info,
                    }));
                }
                None => emit_json(json!({ "buffer": info })),
            }
            Ok(RunOutcome::ok())
        }
        Command::Read { file, verify } => {
            let mapped = MappedBuffer::open(&file)?;
            let monster = decode(mapped.bytes(), verify.framing(), verify.limits())
                .map_err(|err| err.with_path(mapped.path()))?;
            let record = MonsterRecord::unpack(&monster);
            emit_json(json!({
                "path": file.display().to_string(),
                "buffer": BufferInfo::describe(mapped.bytes(), verify.framing()),
                "monster": record,
            }));
            Ok(RunOutcome::ok())
        }
        Command::Check { file, verify } => {
            let mapped = MappedBuffer::open(&file)?;
            let monster = decode(mapped.bytes(), verify.framing(), verify.limits())
                .map_err(|err| err.with_path(mapped.path()))?;
            let report = check_sample(&monster);
            emit_json(json!({
                "path": file.display().to_string(),
                "report": report,
            }));
            ensure_report_ok(&report).map_err(|err| err.with_path(&file))?;
            Ok(RunOutcome::ok())
        }
    }
}

fn run_demo(json_output: bool) -> Result<RunOutcome, Error> {
    let mut fbb = FlatBufferBuilder::new();
    build_sample(&mut fbb);
    let bytes = fbb.finished_data();
    tracing::debug!(len = bytes.len(), "built sample buffer");

    // Read it back as if it had just arrived from disk or the network.
    let monster = schema::root_as_monster(bytes).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("freshly built sample failed verification")
            .with_source(err)
    })?;
    let report = check_sample(&monster);

    if json_output {
        let record = MonsterRecord::unpack(&monster);
        emit_json(json!({
            "buffer": BufferInfo::describe(bytes, Framing::Plain),
            "monster": record,
            "report": report,
        }));
    } else {
        for line in summary_lines(&monster) {
            println!("{line}");
        }
        if report.is_ok() {
            println!("The FlatBuffer was successfully created and verified!");
        }
    }

    ensure_report_ok(&report).map_err(|err| err.with_message("sample failed its own checks"))?;
    Ok(RunOutcome::ok())
}

fn read_record(path: &Path) -> Result<MonsterRecord, Error> {
    let bytes = std::fs::read(path).map_err(|err| {
        Error::from_io(err, path).with_message("failed to read monster json")
    })?;
    MonsterRecord::from_json(&bytes).map_err(|err| err.with_path(path))
}

fn ensure_report_ok(report: &SampleReport) -> Result<(), Error> {
    if report.is_ok() {
        return Ok(());
    }
    for issue in &report.issues {
        tracing::warn!(
            check = %issue.check,
            expected = %issue.expected,
            actual = %issue.actual,
            "sample check failed"
        );
    }
    Err(Error::new(ErrorKind::Corrupt)
        .with_message(format!(
            "{} of {} sample checks failed",
            report.issues.len(),
            report.checks_run
        ))
        .with_hint(
            "Compare against `monsterbuf build --out` output, or inspect with `monsterbuf read`.",
        ))
}
