use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use leafid_core::{FileCandidate, Msg, SelectionSource, MAX_UPLOAD_BYTES};

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Msg(Msg),
    Help,
    Quit,
}

pub fn parse(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "pick" => choose(SelectionSource::Picker, rest)?,
        "drop" => choose(SelectionSource::Drop, rest)?,
        "input" => choose(SelectionSource::InputChange, rest)?,
        "submit" | "process" => Command::Msg(Msg::SubmitClicked),
        "cancel" => Command::Msg(Msg::CancelClicked),
        "reset" | "again" => Command::Msg(Msg::ResetClicked),
        "plant" => Command::Msg(Msg::PlantCardClicked(required(word, rest)?.to_string())),
        "feature" => Command::Msg(Msg::FeatureCardClicked(required(word, rest)?.to_string())),
        "close" => Command::Msg(Msg::CloseModalClicked),
        "outside" => Command::Msg(Msg::OutsideModalClicked),
        "esc" | "escape" => Command::Msg(Msg::EscapePressed),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{other}', try 'help'"),
    };
    Ok(Some(command))
}

fn required<'a>(word: &str, rest: &'a str) -> anyhow::Result<&'a str> {
    if rest.is_empty() {
        bail!("'{word}' needs an argument");
    }
    Ok(rest)
}

fn choose(source: SelectionSource, path: &str) -> anyhow::Result<Command> {
    let path = required("file", path)?;
    let file = read_candidate(Path::new(path))?;
    Ok(Command::Msg(Msg::FileChosen { source, file }))
}

/// Builds a candidate from disk. Oversized files are not read; their declared size is enough.
pub fn read_candidate(path: &Path) -> anyhow::Result<FileCandidate> {
    let metadata =
        fs::metadata(path).with_context(|| format!("cannot open {}", path.display()))?;
    if !metadata.is_file() {
        bail!("{} is not a file", path.display());
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let media_type = media_type_for(path);

    let size = metadata.len();
    if size > MAX_UPLOAD_BYTES {
        return Ok(FileCandidate {
            name,
            media_type,
            size,
            content: Arc::from(Vec::new()),
        });
    }
    let content = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    Ok(FileCandidate::new(name, media_type, content))
}

pub fn media_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
