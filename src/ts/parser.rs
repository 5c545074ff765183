// SPDX-License-Identifier: PMPL-1.0-or-later

//! Event-driven reader for `.ts` documents built on `quick-xml`.

use crate::error::{ResourceError, Result};
use crate::types::{ContextDocument, Entry, LocaleDocument, Location, Status};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use std::fmt::Display;
use std::path::Path;

pub(super) struct Parser<'a> {
    reader: Reader<&'a [u8]>,
    path: &'a Path,
}

/// Message fields gathered before the context name is known.
#[derive(Default)]
struct RawMessage {
    source: Option<String>,
    disambiguation: Option<String>,
    translation: Option<(String, Status)>,
    locations: Vec<Location>,
    translator_comment: Option<String>,
    extra_comment: Option<String>,
}

impl<'a> Parser<'a> {
    pub(super) fn new(input: &'a str, path: &'a Path) -> Self {
        Self {
            reader: Reader::from_str(input),
            path,
        }
    }

    pub(super) fn parse(mut self) -> Result<LocaleDocument> {
        loop {
            match self.next_event()? {
                Event::Start(e) if e.name().as_ref() == b"TS" => {
                    let mut doc = self.document_header(&e)?;
                    doc.contexts = self.parse_root()?;
                    return Ok(doc);
                }
                Event::Empty(e) if e.name().as_ref() == b"TS" => {
                    return self.document_header(&e);
                }
                Event::Start(e) | Event::Empty(e) => {
                    return Err(self.malformed(format!(
                        "expected <TS> root element, found <{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                Event::Eof => return Err(self.malformed("no <TS> root element")),
                // Declaration, doctype, comments, whitespace.
                _ => {}
            }
        }
    }

    fn document_header(&self, e: &BytesStart<'_>) -> Result<LocaleDocument> {
        Ok(LocaleDocument {
            language: self.attr(e, b"language")?.filter(|l| !l.is_empty()),
            source_language: self
                .attr(e, b"sourcelanguage")?
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| "en".to_string()),
            format_version: self.attr(e, b"version")?,
            contexts: Vec::new(),
        })
    }

    fn parse_root(&mut self) -> Result<Vec<ContextDocument>> {
        let mut contexts = Vec::new();
        loop {
            match self.next_event()? {
                Event::Start(e) if e.name().as_ref() == b"context" => {
                    contexts.push(self.parse_context()?);
                }
                Event::Start(e) => self.skip(&e)?,
                Event::End(_) => return Ok(contexts),
                Event::Eof => return Err(self.malformed("unexpected end of document inside <TS>")),
                _ => {}
            }
        }
    }

    fn parse_context(&mut self) -> Result<ContextDocument> {
        let mut name = None;
        let mut messages = Vec::new();
        loop {
            match self.next_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"name" => name = Some(self.read_text()?),
                    b"message" => {
                        let numerus = self.attr(&e, b"numerus")?.as_deref() == Some("yes");
                        messages.push(self.parse_message(numerus)?);
                    }
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) if e.name().as_ref() == b"name" => name = Some(String::new()),
                Event::End(_) => break,
                Event::Eof => {
                    return Err(self.malformed("unexpected end of document inside <context>"))
                }
                _ => {}
            }
        }

        let name = name.ok_or_else(|| self.missing("context", "name"))?;
        let entries = messages
            .into_iter()
            .map(|raw| self.finish_message(&name, raw))
            .collect::<Result<Vec<_>>>()?;
        Ok(ContextDocument { name, entries })
    }

    fn parse_message(&mut self, numerus: bool) -> Result<RawMessage> {
        let mut raw = RawMessage::default();
        loop {
            match self.next_event()? {
                Event::Empty(e) => match e.name().as_ref() {
                    b"location" => raw.locations.push(self.location(&e)?),
                    b"source" => raw.source = Some(String::new()),
                    b"translation" => {
                        let status = self.status(&e)?;
                        raw.translation = Some((String::new(), status));
                    }
                    _ => {}
                },
                Event::Start(e) => match e.name().as_ref() {
                    b"location" => {
                        raw.locations.push(self.location(&e)?);
                        self.skip(&e)?;
                    }
                    b"source" => raw.source = Some(self.read_text()?),
                    b"comment" => raw.disambiguation = Some(self.read_text()?),
                    b"extracomment" => raw.extra_comment = Some(self.read_text()?),
                    b"translatorcomment" => raw.translator_comment = Some(self.read_text()?),
                    b"translation" => {
                        let status = self.status(&e)?;
                        let text = self.read_translation(numerus)?;
                        raw.translation = Some((text, status));
                    }
                    _ => self.skip(&e)?,
                },
                Event::End(_) => return Ok(raw),
                Event::Eof => {
                    return Err(self.malformed("unexpected end of document inside <message>"))
                }
                _ => {}
            }
        }
    }

    fn finish_message(&self, context: &str, raw: RawMessage) -> Result<Entry> {
        let source_text = raw.source.ok_or_else(|| self.missing("message", "source"))?;
        let (translation, status) = raw
            .translation
            .ok_or_else(|| self.missing("message", "translation"))?;
        Ok(Entry {
            context: context.to_string(),
            source_text,
            disambiguation: raw.disambiguation.filter(|d| !d.is_empty()),
            translation,
            status,
            locations: raw.locations,
            translator_comment: raw.translator_comment.filter(|c| !c.is_empty()),
            extra_comment: raw.extra_comment.filter(|c| !c.is_empty()),
        })
    }

    fn location(&self, e: &BytesStart<'_>) -> Result<Location> {
        let file = self
            .attr(e, b"filename")?
            .ok_or_else(|| self.missing("location", "filename"))?;
        let line = match self.attr(e, b"line")? {
            None => None,
            Some(value) => Some(value.trim().parse::<u32>().map_err(|_| {
                self.malformed(format!("location line {:?} is not a number", value))
            })?),
        };
        Ok(Location { file, line })
    }

    fn status(&self, e: &BytesStart<'_>) -> Result<Status> {
        let kind = self.attr(e, b"type")?;
        Status::from_type_attr(kind.as_deref()).ok_or_else(|| {
            self.malformed(format!(
                "unknown translation type {:?}",
                kind.unwrap_or_default()
            ))
        })
    }

    /// Text content up to the end of the current element.
    fn read_text(&mut self) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.next_event()? {
                Event::Text(t) => {
                    let unescaped = t.unescape().map_err(|err| self.xml_error(err))?;
                    text.push_str(&unescaped);
                }
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
                Event::Empty(e) if e.name().as_ref() == b"byte" => {
                    text.push(self.byte_char(&e)?);
                }
                Event::Start(e) => self.skip(&e)?,
                Event::End(_) => return Ok(text),
                Event::Eof => return Err(self.malformed("unexpected end of document in text")),
                _ => {}
            }
        }
    }

    /// Translation text; plural and length variants collapse to their first form.
    fn read_translation(&mut self, numerus: bool) -> Result<String> {
        let mut text = String::new();
        let mut first_form: Option<String> = None;
        loop {
            match self.next_event()? {
                Event::Text(t) => {
                    let unescaped = t.unescape().map_err(|err| self.xml_error(err))?;
                    text.push_str(&unescaped);
                }
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
                Event::Empty(e) if e.name().as_ref() == b"byte" => {
                    text.push(self.byte_char(&e)?);
                }
                Event::Start(e)
                    if matches!(e.name().as_ref(), b"numerusform" | b"lengthvariant") =>
                {
                    let form = self.read_text()?;
                    first_form.get_or_insert(form);
                }
                Event::Start(e) => self.skip(&e)?,
                Event::End(_) => break,
                Event::Eof => {
                    return Err(self.malformed("unexpected end of document inside <translation>"))
                }
                _ => {}
            }
        }
        match first_form {
            Some(form) => Ok(form),
            // Whitespace between <numerusform> children is layout, not text.
            None if numerus && text.trim().is_empty() => Ok(String::new()),
            None => Ok(text),
        }
    }

    /// `<byte value="x9"/>` encodes a control character.
    fn byte_char(&self, e: &BytesStart<'_>) -> Result<char> {
        let value = self
            .attr(e, b"value")?
            .ok_or_else(|| self.missing("byte", "value"))?;
        let code = match value.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => value.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
            .ok_or_else(|| self.malformed(format!("invalid byte value {:?}", value)))
    }

    fn attr(&self, e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.xml_error(err))?;
            if attr.key.as_ref() == key {
                let value = attr.unescape_value().map_err(|err| self.xml_error(err))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    fn skip(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let name = e.name().as_ref().to_vec();
        self.reader
            .read_to_end(QName(&name))
            .map_err(|err| self.xml_error(err))?;
        Ok(())
    }

    fn next_event(&mut self) -> Result<Event<'a>> {
        self.reader.read_event().map_err(|err| self.xml_error(err))
    }

    fn xml_error(&self, err: impl Display) -> ResourceError {
        ResourceError::Xml {
            path: self.path.to_path_buf(),
            message: format!("{} (near byte {})", err, self.reader.buffer_position()),
        }
    }

    fn malformed(&self, message: impl Into<String>) -> ResourceError {
        ResourceError::Malformed {
            path: self.path.to_path_buf(),
            message: message.into(),
        }
    }

    fn missing(&self, element: &'static str, field: &'static str) -> ResourceError {
        ResourceError::MissingField {
            path: self.path.to_path_buf(),
            element,
            field,
        }
    }
}
