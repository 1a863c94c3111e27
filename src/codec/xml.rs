//! XML codec.
//!
//! The root element declares every catalog binding and each property value
//! becomes one child element. Flavor and a missing root tag have no natural
//! XML representation, so they travel in a `dublincore-catalog` processing
//! instruction ahead of the root:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <?dublincore-catalog flavor="dublincore/episode"?>
//! <dublincore xmlns:dcterms="http://purl.org/dc/terms/" xmlns="http://www.opencastproject.org/xsd/1.0/dublincore/">
//!   <dcterms:title xml:lang="en">Lecture 1</dcterms:title>
//! </dublincore>
//! ```
//!
//! Namespaces a value needs that the catalog does not bind are declared on the
//! property element itself. On read, only declarations on the root element
//! become catalog bindings; `scoped="..."` in the header lists root
//! declarations that were generated for the root tag and are not bindings.

use crate::catalog::ename::is_ncname;
use crate::catalog::namespace::{XML_NS_PREFIX, XML_NS_URI, XMLNS_ATTRIBUTE};
use crate::catalog::{
    DublinCoreCatalog, DublinCoreValue, EName, Flavor, FlavorParseError, NamespaceBinding,
};
use crate::codec::Format;
use crate::config::WriteOptions;
use crate::error::{CatalogError, ParseError, Result, WriteError};
use crate::vocabulary::{XSI_NS_URI, vocabulary};
use quick_xml::Reader;
use quick_xml::escape::{escape, unescape};
use quick_xml::events::{BytesStart, Event};
use std::fmt::Write;
use tracing::debug;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const HEADER_PI_TARGET: &str = "dublincore-catalog";
/// Element name used when the catalog has no root tag.
const IMPLICIT_ROOT_NAME: &str = "dublincore";
const INDENT: &str = "  ";

pub fn write(catalog: &DublinCoreCatalog) -> Result<String> {
    write_with(catalog, &WriteOptions::default())
}

pub fn write_with(catalog: &DublinCoreCatalog, options: &WriteOptions) -> Result<String> {
    render(catalog, options).map_err(|err| CatalogError::write(Format::Xml, err))
}

pub fn read(text: &str) -> Result<DublinCoreCatalog> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    parse(text).map_err(|source| CatalogError::read(Format::Xml, source))
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

fn render(catalog: &DublinCoreCatalog, options: &WriteOptions) -> Result<String, WriteError> {
    let newline = if options.pretty { "\n" } else { "" };

    let mut root_scope: Vec<(String, String)> = Vec::new();
    for binding in catalog.bindings() {
        if !binding.is_default() {
            check_name(binding.prefix())?;
        }
        root_scope.push((binding.prefix().to_string(), binding.uri().to_string()));
    }

    let mut scoped = Vec::new();
    let root_name = match catalog.root_tag() {
        Some(tag) => {
            check_name(tag.local_name())?;
            let prefix = root_prefix(tag, &mut root_scope, &mut scoped)?;
            qualify(&prefix, tag.local_name())
        }
        None => IMPLICIT_ROOT_NAME.to_string(),
    };

    let mut xml = String::new();
    if options.xml_declaration {
        xml.push_str(XML_DECLARATION);
        xml.push_str(newline);
    }
    if let Some(header) = header_pi(catalog.flavor(), catalog.root_tag().is_none(), &scoped)? {
        xml.push_str(&header);
        xml.push_str(newline);
    }

    write!(xml, "<{root_name}")?;
    for (prefix, uri) in &root_scope {
        write_xmlns(&mut xml, prefix, uri)?;
    }
    if catalog.is_empty() {
        xml.push_str("/>");
        return Ok(xml);
    }
    xml.push('>');
    xml.push_str(newline);

    for property in catalog.properties() {
        check_name(property.name().local_name())?;
        for value in property.values() {
            if options.pretty {
                xml.push_str(INDENT);
            }
            write_value(&mut xml, &root_scope, property.name(), value)?;
            xml.push_str(newline);
        }
    }
    write!(xml, "</{root_name}>")?;
    Ok(xml)
}

fn root_prefix(
    tag: &EName,
    root_scope: &mut Vec<(String, String)>,
    scoped: &mut Vec<String>,
) -> Result<String, WriteError> {
    if !tag.has_namespace() {
        if root_scope.iter().any(|(prefix, _)| prefix.is_empty()) {
            return Err(WriteError::Unrepresentable(format!(
                "root tag '{}' has no namespace but the catalog binds a default namespace",
                tag.local_name()
            )));
        }
        return Ok(String::new());
    }
    if let Some((prefix, _)) = root_scope.iter().find(|(_, uri)| uri == tag.namespace()) {
        return Ok(prefix.clone());
    }
    let prefix = fresh_prefix(tag.namespace(), |candidate| {
        root_scope.iter().any(|(prefix, _)| prefix == candidate)
    });
    root_scope.push((prefix.clone(), tag.namespace().to_string()));
    scoped.push(prefix.clone());
    Ok(prefix)
}

fn header_pi(
    flavor: Option<&Flavor>,
    implicit_root: bool,
    scoped: &[String],
) -> Result<Option<String>, WriteError> {
    let mut content = String::new();
    if let Some(flavor) = flavor {
        write!(content, r#" flavor="{}""#, escape_attribute(&flavor.to_string()))?;
    }
    if implicit_root {
        content.push_str(r#" root="implicit""#);
    }
    if !scoped.is_empty() {
        write!(content, r#" scoped="{}""#, scoped.join(" "))?;
    }
    if content.is_empty() {
        return Ok(None);
    }
    Ok(Some(format!("<?{HEADER_PI_TARGET}{content}?>")))
}

fn write_value(
    xml: &mut String,
    root_scope: &[(String, String)],
    name: &EName,
    value: &DublinCoreValue,
) -> Result<(), WriteError> {
    let mut element = ElementScope::new(root_scope);
    let element_name = element.element_name(name);

    let mut attributes = String::new();
    if let Some(language) = value.language() {
        write!(attributes, r#" xml:lang="{}""#, escape_attribute(language))?;
    }
    if let Some(scheme) = value.encoding_scheme() {
        check_name(scheme.local_name())?;
        let xsi = element.attribute_prefix(XSI_NS_URI);
        let scheme_name = if scheme.has_namespace() {
            let prefix = element.attribute_prefix(scheme.namespace());
            qualify(&prefix, scheme.local_name())
        } else {
            scheme.local_name().to_string()
        };
        write!(attributes, r#" {xsi}:type="{}""#, escape_attribute(&scheme_name))?;
    }

    write!(xml, "<{element_name}")?;
    for (prefix, uri) in &element.declared {
        write_xmlns(xml, prefix, uri)?;
    }
    xml.push_str(&attributes);
    if value.value().is_empty() {
        xml.push_str("/>");
    } else {
        write!(xml, ">{}</{element_name}>", escape_text(value.value()))?;
    }
    Ok(())
}

/// Namespace declarations local to one property element.
struct ElementScope<'a> {
    root: &'a [(String, String)],
    declared: Vec<(String, String)>,
}

impl<'a> ElementScope<'a> {
    fn new(root: &'a [(String, String)]) -> Self {
        Self {
            root,
            declared: Vec::new(),
        }
    }

    fn is_bound(&self, prefix: &str) -> bool {
        prefix == XML_NS_PREFIX
            || self
                .declared
                .iter()
                .chain(self.root.iter())
                .any(|(p, _)| p == prefix)
    }

    fn element_name(&mut self, name: &EName) -> String {
        if !name.has_namespace() {
            let default_bound = self.root.iter().any(|(prefix, _)| prefix.is_empty());
            if default_bound {
                self.declared.push((String::new(), String::new()));
            }
            return name.local_name().to_string();
        }
        let prefix = match self.root.iter().find(|(_, uri)| uri == name.namespace()) {
            Some((prefix, _)) => prefix.clone(),
            None => self.declare(name.namespace()),
        };
        qualify(&prefix, name.local_name())
    }

    /// Non-empty prefix for `uri`, declaring one on this element when needed.
    fn attribute_prefix(&mut self, uri: &str) -> String {
        if uri == XML_NS_URI {
            return XML_NS_PREFIX.to_string();
        }
        let bound = self
            .declared
            .iter()
            .chain(self.root.iter())
            .find(|(prefix, bound_uri)| bound_uri == uri && !prefix.is_empty());
        match bound {
            Some((prefix, _)) => prefix.clone(),
            None => self.declare(uri),
        }
    }

    fn declare(&mut self, uri: &str) -> String {
        let prefix = fresh_prefix(uri, |candidate| self.is_bound(candidate));
        self.declared.push((prefix.clone(), uri.to_string()));
        prefix
    }
}

/// Well-known prefix for `uri` if it is free, otherwise `ns1`, `ns2`, ...
fn fresh_prefix(uri: &str, taken: impl Fn(&str) -> bool) -> String {
    if let Some(prefix) = vocabulary().well_known_prefix(uri) {
        if !taken(prefix) {
            return prefix.to_string();
        }
    }
    let mut n = 1usize;
    loop {
        let candidate = format!("ns{n}");
        if candidate != XML_NS_PREFIX && !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn qualify(prefix: &str, local_name: &str) -> String {
    if prefix.is_empty() {
        local_name.to_string()
    } else {
        format!("{prefix}:{local_name}")
    }
}

fn check_name(name: &str) -> Result<(), WriteError> {
    if is_ncname(name) {
        Ok(())
    } else {
        Err(WriteError::InvalidName(name.to_string()))
    }
}

fn write_xmlns(xml: &mut String, prefix: &str, uri: &str) -> Result<(), WriteError> {
    if prefix.is_empty() {
        write!(xml, r#" xmlns="{}""#, escape_attribute(uri))?;
    } else {
        write!(xml, r#" xmlns:{prefix}="{}""#, escape_attribute(uri))?;
    }
    Ok(())
}

fn escape_text(raw: &str) -> String {
    escape(raw).replace('\r', "&#13;")
}

fn escape_attribute(raw: &str) -> String {
    escape(raw)
        .replace('\r', "&#13;")
        .replace('\n', "&#10;")
        .replace('\t', "&#9;")
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

fn parse(text: &str) -> Result<DublinCoreCatalog, ParseError> {
    let mut reader = Reader::from_str(text);
    let mut parser = CatalogParser::default();
    loop {
        match reader.read_event()? {
            Event::PI(pi) => {
                if parser.in_prolog() && pi.target() == HEADER_PI_TARGET.as_bytes() {
                    parser.header = parse_header(utf8(pi.content())?)?;
                }
            }
            Event::Start(start) => parser.start(&start, false)?,
            Event::Empty(start) => parser.start(&start, true)?,
            Event::End(_) => parser.end()?,
            Event::Text(text) => parser.text(&text.unescape()?)?,
            Event::CData(cdata) => parser.text(utf8(&cdata)?)?,
            Event::Eof => break,
            _ => {}
        }
    }
    parser.finish()
}

#[derive(Default)]
struct Header {
    flavor: Option<Flavor>,
    implicit_root: bool,
    scoped: Vec<String>,
}

struct RootElement {
    name: EName,
    declarations: Vec<(String, String)>,
}

struct PendingValue {
    name: EName,
    language: Option<String>,
    encoding_scheme: Option<EName>,
    text: String,
}

impl PendingValue {
    fn into_value(self) -> DublinCoreValue {
        let mut value = DublinCoreValue::new(self.text);
        if let Some(language) = self.language {
            value = value.with_language(language);
        }
        if let Some(scheme) = self.encoding_scheme {
            value = value.with_encoding_scheme(scheme);
        }
        value
    }
}

#[derive(Default)]
enum State {
    #[default]
    Prolog,
    Root,
    Value(PendingValue),
    Epilog,
}

#[derive(Default)]
struct CatalogParser {
    header: Header,
    scopes: Scopes,
    root: Option<RootElement>,
    catalog: DublinCoreCatalog,
    state: State,
}

impl CatalogParser {
    fn in_prolog(&self) -> bool {
        matches!(self.state, State::Prolog)
    }

    fn start(&mut self, start: &BytesStart<'_>, empty: bool) -> Result<(), ParseError> {
        let qname = utf8(start.name().as_ref())?.to_string();
        match self.state {
            State::Prolog => {
                let declarations = declarations(start)?;
                self.scopes.push(declarations.clone());
                let name = self.scopes.resolve_element(&qname)?;
                self.root = Some(RootElement { name, declarations });
                if empty {
                    self.scopes.pop();
                    self.state = State::Epilog;
                } else {
                    self.state = State::Root;
                }
            }
            State::Root => {
                self.scopes.push(declarations(start)?);
                let name = self.scopes.resolve_element(&qname)?;
                let mut pending = PendingValue {
                    name,
                    language: None,
                    encoding_scheme: None,
                    text: String::new(),
                };
                self.value_attributes(start, &mut pending)?;
                if empty {
                    self.scopes.pop();
                    self.catalog.add(&pending.name.clone(), pending.into_value());
                } else {
                    self.state = State::Value(pending);
                }
            }
            State::Value(ref pending) => {
                return Err(ParseError::schema(format!(
                    "unexpected element <{qname}> inside property {}",
                    pending.name
                )));
            }
            State::Epilog => {
                return Err(ParseError::schema(format!(
                    "unexpected element <{qname}> after the root element"
                )));
            }
        }
        Ok(())
    }

    fn end(&mut self) -> Result<(), ParseError> {
        match std::mem::take(&mut self.state) {
            State::Value(pending) => {
                self.scopes.pop();
                let name = pending.name.clone();
                self.catalog.add(&name, pending.into_value());
                self.state = State::Root;
            }
            State::Root => {
                self.scopes.pop();
                self.state = State::Epilog;
            }
            State::Prolog | State::Epilog => {
                return Err(ParseError::schema("closing tag without matching element"));
            }
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), ParseError> {
        match &mut self.state {
            State::Value(pending) => {
                pending.text.push_str(text);
                Ok(())
            }
            _ if text.trim().is_empty() => Ok(()),
            _ => Err(ParseError::schema(format!(
                "unexpected text '{}' outside of a property element",
                text.trim()
            ))),
        }
    }

    fn value_attributes(
        &self,
        start: &BytesStart<'_>,
        pending: &mut PendingValue,
    ) -> Result<(), ParseError> {
        for attr in start.attributes() {
            let attr = attr?;
            let key = utf8(attr.key.as_ref())?;
            let Some((prefix, local)) = key.split_once(':') else {
                continue;
            };
            if prefix == XML_NS_PREFIX && local == "lang" {
                pending.language = Some(attr.unescape_value()?.into_owned());
            } else if prefix != XMLNS_ATTRIBUTE
                && local == "type"
                && self.scopes.resolve(prefix) == Some(XSI_NS_URI)
            {
                let raw = attr.unescape_value()?;
                pending.encoding_scheme = Some(self.scopes.resolve_value(raw.trim())?);
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<DublinCoreCatalog, ParseError> {
        match self.state {
            State::Epilog => {}
            State::Prolog => return Err(ParseError::schema("document has no root element")),
            State::Root | State::Value(_) => {
                return Err(ParseError::schema("unexpected end of document inside an element"));
            }
        }
        let root = self
            .root
            .ok_or_else(|| ParseError::schema("document has no root element"))?;

        let mut catalog = self.catalog;
        for (prefix, uri) in root.declarations {
            if self.header.scoped.contains(&prefix) {
                continue;
            }
            catalog.add_binding(NamespaceBinding::new(prefix, uri));
        }
        if !self.header.implicit_root {
            catalog.set_root_tag(root.name);
        }
        if let Some(flavor) = self.header.flavor {
            catalog.set_flavor(flavor);
        }
        Ok(catalog)
    }
}

/// In-scope namespace declarations, innermost element last.
#[derive(Default)]
struct Scopes {
    frames: Vec<Vec<(String, String)>>,
}

impl Scopes {
    fn push(&mut self, frame: Vec<(String, String)>) {
        self.frames.push(frame);
    }

    fn pop(&mut self) {
        self.frames.pop();
    }

    fn resolve(&self, prefix: &str) -> Option<&str> {
        if prefix == XML_NS_PREFIX {
            return Some(XML_NS_URI);
        }
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter())
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    fn resolve_element(&self, qname: &str) -> Result<EName, ParseError> {
        match qname.split_once(':') {
            Some((prefix, local)) => {
                let uri = self.resolve(prefix).ok_or_else(|| {
                    ParseError::schema(format!("undeclared namespace prefix '{prefix}' in <{qname}>"))
                })?;
                Ok(EName::new(uri, local))
            }
            None => Ok(EName::new(self.resolve("").unwrap_or_default(), qname)),
        }
    }

    /// Resolve a QName-valued attribute. Unprefixed values have no namespace.
    fn resolve_value(&self, raw: &str) -> Result<EName, ParseError> {
        if raw.is_empty() {
            return Err(ParseError::schema("empty xsi:type value"));
        }
        match raw.split_once(':') {
            Some((prefix, local)) => {
                let uri = self.resolve(prefix).ok_or_else(|| {
                    ParseError::schema(format!("undeclared namespace prefix '{prefix}' in xsi:type"))
                })?;
                Ok(EName::new(uri, local))
            }
            None => Ok(EName::unqualified(raw)),
        }
    }
}

fn declarations(start: &BytesStart<'_>) -> Result<Vec<(String, String)>, ParseError> {
    let mut declarations = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = utf8(attr.key.as_ref())?;
        let prefix = match key.strip_prefix(XMLNS_ATTRIBUTE) {
            Some("") => "",
            Some(rest) => match rest.strip_prefix(':') {
                Some(prefix) => prefix,
                None => continue,
            },
            None => continue,
        };
        declarations.push((prefix.to_string(), attr.unescape_value()?.into_owned()));
    }
    Ok(declarations)
}

fn parse_header(content: &str) -> Result<Header, ParseError> {
    let malformed = || ParseError::schema(format!("malformed {HEADER_PI_TARGET} header '{content}'"));
    let mut header = Header::default();
    let mut rest = content.trim();
    while !rest.is_empty() {
        let (name, after) = rest.split_once('=').ok_or_else(malformed)?;
        let after = after.trim_start().strip_prefix('"').ok_or_else(malformed)?;
        let (raw, tail) = after.split_once('"').ok_or_else(malformed)?;
        let value = unescape(raw).map_err(|err| ParseError::schema(err.to_string()))?;
        match name.trim() {
            "flavor" => {
                header.flavor = Some(
                    value
                        .parse()
                        .map_err(|err: FlavorParseError| ParseError::schema(err.to_string()))?,
                );
            }
            "root" => header.implicit_root = value == "implicit",
            "scoped" => {
                header.scoped = value.split_whitespace().map(str::to_string).collect();
            }
            other => debug!(attribute = other, "ignoring unknown catalog header attribute"),
        }
        rest = tail.trim_start();
    }
    Ok(header)
}

fn utf8(bytes: &[u8]) -> Result<&str, ParseError> {
    std::str::from_utf8(bytes).map_err(|err| ParseError::schema(err.to_string()))
}
