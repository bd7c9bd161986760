//! Reading input documents and writing JSON output.

use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// How the input was laid out, so output can keep the same layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// A single JSON object.
    Single,
    /// A JSON array of documents.
    Array,
    /// One JSON document per line.
    Lines,
}

/// Reads a JSON file, or stdin when `input` is `None`.
pub fn read_text(input: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    match input {
        Some(path) => Ok(fs::read_to_string(path)
            .map_err(|e| format!("Failed to read file {}: {}", path.display(), e))?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

pub fn read_json(input: Option<&Path>) -> Result<Value, Box<dyn std::error::Error>> {
    let text = read_text(input)?;
    Ok(serde_json::from_str(&text).map_err(|e| format!("Invalid JSON: {}", e))?)
}

/// Reads documents from a JSON object, a JSON array or JSON Lines.
pub fn read_documents(
    input: Option<&Path>,
) -> Result<(Vec<Value>, Layout), Box<dyn std::error::Error>> {
    let text = read_text(input)?;
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Array(items)) => Ok((items, Layout::Array)),
        Ok(other) => Ok((vec![other], Layout::Single)),
        Err(whole) => {
            let mut documents = Vec::new();
            for (line_no, line) in text.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let document = serde_json::from_str(line).map_err(|e| {
                    if line_no == 0 {
                        format!("Invalid JSON: {}", whole)
                    } else {
                        format!("Invalid JSON on line {}: {}", line_no + 1, e)
                    }
                })?;
                documents.push(document);
            }
            Ok((documents, Layout::Lines))
        }
    }
}

/// Writes `documents` in `layout` to `output`, or stdout.
pub fn write_documents(
    documents: &[Value],
    layout: Layout,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = match layout {
        Layout::Single if documents.len() == 1 => format_json(&documents[0])?,
        Layout::Single | Layout::Array => format_json(&documents)?,
        Layout::Lines => {
            let mut text = String::new();
            for document in documents {
                text.push_str(&serde_json::to_string(document)?);
                text.push('\n');
            }
            return write_text(&text, output);
        }
    };
    write_text(&text, output)
}

/// Pretty JSON for any serializable value.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

pub fn write_json<T: Serialize + ?Sized>(
    value: &T,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    write_text(&format_json(value)?, output)
}

fn write_text(text: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            let mut content = text.to_string();
            if !content.ends_with('\n') {
                content.push('\n');
            }
            fs::write(path, content)
                .map_err(|e| format!("Failed to write file {}: {}", path.display(), e))?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                handle.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
