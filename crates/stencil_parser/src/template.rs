use stencil_core::{
    is_void_element, span_of, to_byte_pos, to_offset, Attribute, AttributeValue,
    AttributeValuePart, BlockBinding, EachBlock, ElementNode, IfBlock, MustacheTag, ScriptBlock,
    StencilAtom, StyleBlock, Template, TemplateNode, TextNode,
};
use swc_core::{
    common::{Span, Spanned},
    ecma::ast::Expr,
};

use crate::{
    error::{ParseError, ParseErrorKind},
    script::{parse_expr, parse_module},
    ParseOptions,
};

const MUSTACHE_START: &str = "{{";
const MUSTACHE_END: &str = "}}";

type PResult<T> = Result<T, ParseError>;

/// What made [`TemplateParser::parse_children`] stop
enum Stop {
    Eof,
    /// `</name>`
    ClosingTag(StencilAtom),
    /// `{{/name}}`
    BlockClose(StencilAtom),
    /// `{{else}}`
    Else,
    /// `{{elseif cond}}` or `{{else if cond}}`
    ElseIf(Box<Expr>),
}

/// What a `{{ ... }}` turned out to be
enum Mustache {
    Tag(Box<Expr>),
    If(Box<Expr>),
    Each {
        expression: Box<Expr>,
        item: BlockBinding,
        index: Option<BlockBinding>,
    },
    Stop(Stop),
}

pub struct TemplateParser<'s, 'o> {
    source: &'s str,
    index: usize,
    options: &'o ParseOptions,
    script: Option<ScriptBlock>,
    css: Option<StyleBlock>,
}

impl<'s, 'o> TemplateParser<'s, 'o> {
    pub fn new(source: &'s str, options: &'o ParseOptions) -> Self {
        TemplateParser {
            source,
            index: 0,
            options,
            script: None,
            css: None,
        }
    }

    pub fn parse_template(mut self) -> PResult<Template> {
        let (html, stop, stop_start) = self.parse_children(0)?;

        let unexpected = match stop {
            Stop::Eof => None,
            Stop::ClosingTag(name) => Some(ParseErrorKind::UnexpectedClosingTag(name)),
            Stop::BlockClose(name) => Some(ParseErrorKind::UnexpectedBlockClose(name)),
            Stop::Else | Stop::ElseIf(_) => Some(ParseErrorKind::UnexpectedElse),
        };
        if let Some(kind) = unexpected {
            return Err(self.error(kind, stop_start, self.index));
        }

        Ok(Template {
            html,
            script: self.script,
            css: self.css,
        })
    }

    /// Parses nodes until something which cannot be a child is encountered.
    /// Returns the children, the reason of stopping and where the stopping construct starts.
    fn parse_children(&mut self, depth: usize) -> PResult<(Vec<TemplateNode>, Stop, usize)> {
        let mut children = Vec::new();

        loop {
            let start = self.index;
            let rest = self.rest();

            if rest.is_empty() {
                return Ok((children, Stop::Eof, start));
            }

            if rest.starts_with(MUSTACHE_START) {
                match self.parse_mustache()? {
                    Mustache::Tag(expression) => {
                        children.push(TemplateNode::MustacheTag(MustacheTag {
                            expression,
                            span: span_of(start, self.index),
                        }))
                    }
                    Mustache::If(expression) => {
                        let if_block = self.parse_if_block(expression, start, depth)?;
                        children.push(TemplateNode::IfBlock(if_block));
                    }
                    Mustache::Each {
                        expression,
                        item,
                        index,
                    } => {
                        let each_block =
                            self.parse_each_block(expression, item, index, start, depth)?;
                        children.push(TemplateNode::EachBlock(each_block));
                    }
                    Mustache::Stop(stop) => return Ok((children, stop, start)),
                }
                continue;
            }

            if rest.starts_with("<!--") {
                let Some(end) = rest.find("-->") else {
                    return Err(self.error(
                        ParseErrorKind::UnclosedComment,
                        start,
                        self.source.len(),
                    ));
                };

                // Comments are part of the markup and are rendered as is
                self.index += end + "-->".len();
                children.push(TemplateNode::Text(TextNode {
                    data: StencilAtom::from(&self.source[start..self.index]),
                    span: span_of(start, self.index),
                }));
                continue;
            }

            if rest.starts_with("</") {
                let name = self.parse_closing_tag()?;
                return Ok((children, Stop::ClosingTag(name), start));
            }

            if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
                if let Some(element) = self.parse_element(depth)? {
                    children.push(TemplateNode::Element(element));
                }
                continue;
            }

            children.push(TemplateNode::Text(self.parse_text()));
        }
    }

    /// Consumes text up to the next mustache or tag
    fn parse_text(&mut self) -> TextNode {
        let start = self.index;
        let rest = self.rest();

        // Text is never empty, a lone `<` is included into it
        let mut end = rest.len();
        for (idx, c) in rest.char_indices().skip(1) {
            if c == '{' && rest[idx..].starts_with(MUSTACHE_START) {
                end = idx;
                break;
            }
            if c == '<' && starts_tag(&rest[idx..]) {
                end = idx;
                break;
            }
        }

        self.index += end;
        TextNode {
            data: StencilAtom::from(&rest[..end]),
            span: span_of(start, self.index),
        }
    }

    /// Parses an element starting at `<`.
    /// Returns `None` for top-level `<script>` and `<style>`, which are recorded separately.
    fn parse_element(&mut self, depth: usize) -> PResult<Option<ElementNode>> {
        let start = self.index;
        self.index += 1;

        let name = self.read_while(is_tag_name_char);
        if name.is_empty() {
            return Err(self.error(ParseErrorKind::InvalidTagSyntax, start, self.index));
        }
        let name = StencilAtom::from(name);

        let attributes = self.parse_attributes()?;

        let is_self_closing = if self.eat("/>") {
            true
        } else if self.eat(">") {
            false
        } else {
            return Err(self.error(ParseErrorKind::InvalidTagSyntax, start, self.index));
        };

        if name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style") {
            if depth != 0 {
                return Err(self.error(
                    ParseErrorKind::NestedScriptOrStyle(name),
                    start,
                    self.index,
                ));
            }
            self.parse_raw_block(name, start, is_self_closing)?;
            return Ok(None);
        }

        if is_self_closing || is_void_element(&name) {
            return Ok(Some(ElementNode {
                name,
                attributes,
                children: Vec::new(),
                span: span_of(start, self.index),
            }));
        }

        let (children, stop, stop_start) = self.parse_children(depth + 1)?;
        match stop {
            Stop::ClosingTag(closing) if closing == name => {}
            Stop::ClosingTag(closing) => {
                return Err(self.error(
                    ParseErrorKind::UnexpectedClosingTag(closing),
                    stop_start,
                    self.index,
                ))
            }
            _ => {
                return Err(self.error(
                    ParseErrorKind::UnclosedElement(name),
                    start,
                    stop_start,
                ))
            }
        }

        Ok(Some(ElementNode {
            name,
            attributes,
            children,
            span: span_of(start, self.index),
        }))
    }

    /// Consumes `</name>` and returns the name
    fn parse_closing_tag(&mut self) -> PResult<StencilAtom> {
        let start = self.index;
        self.index += "</".len();

        let name = StencilAtom::from(self.read_while(is_tag_name_char));
        self.skip_whitespace();

        if name.is_empty() || !self.eat(">") {
            return Err(self.error(ParseErrorKind::InvalidTagSyntax, start, self.index));
        }

        Ok(name)
    }

    /// `<script>` and `<style>`: contents are not template syntax
    fn parse_raw_block(
        &mut self,
        name: StencilAtom,
        start: usize,
        is_self_closing: bool,
    ) -> PResult<()> {
        let content_start = self.index;
        let content_end = if is_self_closing {
            content_start
        } else {
            let closing = format!("</{}>", name.to_ascii_lowercase());
            let Some(offset) = find_ignore_ascii_case(self.rest(), &closing) else {
                return Err(self.error(
                    ParseErrorKind::UnclosedElement(name),
                    start,
                    self.source.len(),
                ));
            };
            self.index += offset + closing.len();
            content_start + offset
        };

        let content_span = span_of(content_start, content_end);

        if name.eq_ignore_ascii_case("style") {
            if self.css.is_some() {
                return Err(self.error(ParseErrorKind::DuplicateStyle, start, self.index));
            }
            self.css = Some(StyleBlock { span: content_span });
            return Ok(());
        }

        if self.script.is_some() {
            return Err(self.error(ParseErrorKind::DuplicateScript, start, self.index));
        }

        let content = parse_module(
            &self.source[content_start..content_end],
            self.options.es_version,
            content_span.lo,
            content_span.hi,
        )?;

        self.script = Some(ScriptBlock {
            content: Box::new(content),
            span: content_span,
        });

        Ok(())
    }

    fn parse_attributes(&mut self) -> PResult<Vec<Attribute>> {
        let mut attributes = Vec::new();

        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() || rest.starts_with('>') || rest.starts_with("/>") {
                return Ok(attributes);
            }

            let start = self.index;
            let name = self.read_while(is_attribute_name_char);
            if name.is_empty() {
                return Err(self.error(ParseErrorKind::InvalidTagSyntax, start, start + 1));
            }
            let name = StencilAtom::from(name);

            self.skip_whitespace();
            let value = if self.eat("=") {
                self.skip_whitespace();
                self.parse_attribute_value()?
            } else {
                AttributeValue::Boolean
            };

            attributes.push(Attribute {
                name,
                value,
                span: span_of(start, self.index),
            });
        }
    }

    /// Parses a quoted or unquoted attribute value with `{{ }}` interpolations
    fn parse_attribute_value(&mut self) -> PResult<AttributeValue> {
        let start = self.index;
        let quote = match self.rest().chars().next() {
            Some(q @ ('"' | '\'')) => {
                self.index += 1;
                Some(q)
            }
            _ => None,
        };

        let mut parts = Vec::new();
        let mut text_start = self.index;

        loop {
            let rest = self.rest();
            let Some(c) = rest.chars().next() else {
                if quote.is_some() {
                    return Err(self.error(
                        ParseErrorKind::UnclosedAttributeValue,
                        start,
                        self.index,
                    ));
                }
                break;
            };

            let is_end = match quote {
                Some(q) => c == q,
                None => c.is_whitespace() || c == '>' || rest.starts_with("/>"),
            };

            if is_end || rest.starts_with(MUSTACHE_START) {
                if text_start < self.index {
                    parts.push(AttributeValuePart::Text(StencilAtom::from(
                        &self.source[text_start..self.index],
                    )));
                }

                if is_end {
                    if quote.is_some() {
                        self.index += c.len_utf8();
                    }
                    break;
                }

                let expression = self.parse_mustache_expression()?;
                parts.push(AttributeValuePart::Expression(expression));
                text_start = self.index;
                continue;
            }

            self.index += c.len_utf8();
        }

        Ok(AttributeValue::Parts(parts))
    }

    /// Parses `{{ ... }}` at the current position
    fn parse_mustache(&mut self) -> PResult<Mustache> {
        let start = self.index;
        let (content_start, content_end) = self.consume_mustache()?;
        let content = &self.source[content_start..content_end];
        let trimmed = content.trim_start();
        let leading_ws = content.len() - trimmed.len();

        // Block openers
        if let Some(block) = trimmed.strip_prefix('#') {
            let keyword_len = block
                .find(|c: char| !c.is_ascii_alphanumeric())
                .unwrap_or(block.len());
            let keyword = &block[..keyword_len];
            let args_start = content_start + leading_ws + 1 + keyword_len;

            return match keyword {
                "if" => Ok(Mustache::If(self.expression_at(args_start, content_end)?)),
                "each" => self.parse_each_header(args_start, content_end),
                _ => Err(self.error(
                    ParseErrorKind::UnknownBlock(StencilAtom::from(keyword)),
                    start,
                    self.index,
                )),
            };
        }

        // Block closers
        if let Some(name) = trimmed.strip_prefix('/') {
            return Ok(Mustache::Stop(Stop::BlockClose(StencilAtom::from(name.trim()))));
        }

        // `{{else}}`, `{{elseif cond}}`, `{{else if cond}}`
        if let Some(after_else) = trimmed.strip_prefix("else") {
            if after_else.trim().is_empty() {
                return Ok(Mustache::Stop(Stop::Else));
            }

            let without_ws = after_else.trim_start();
            if let Some(cond) = without_ws.strip_prefix("if") {
                let is_keyword =
                    after_else.starts_with("if") || without_ws.len() != after_else.len();
                if is_keyword && cond.starts_with(char::is_whitespace) {
                    let cond_start = content_end - cond.len();
                    let expression = self.expression_at(cond_start, content_end)?;
                    return Ok(Mustache::Stop(Stop::ElseIf(expression)));
                }
            }
            // Otherwise an identifier such as `{{elsewhere}}`
        }

        Ok(Mustache::Tag(self.expression_at(content_start, content_end)?))
    }

    /// `{{#each <expression> as <item>[, <index>]}}`
    fn parse_each_header(&mut self, args_start: usize, args_end: usize) -> PResult<Mustache> {
        let args = &self.source[args_start..args_end];

        let Some(as_idx) = find_as_keyword(args) else {
            return Err(self.error(ParseErrorKind::InvalidEachBlock, args_start, args_end));
        };

        let expression = self.expression_at(args_start, args_start + as_idx)?;

        let context_start = args_start + as_idx + "as".len();
        let context = &self.source[context_start..args_end];
        let mut bindings = Vec::with_capacity(2);
        let mut offset = context_start;

        for raw in context.split(',') {
            let trimmed = raw.trim();
            let lo = offset + (raw.len() - raw.trim_start().len());
            offset += raw.len() + 1;

            if !is_identifier(trimmed) {
                return Err(self.error(
                    ParseErrorKind::InvalidBindingName(StencilAtom::from(trimmed)),
                    lo,
                    lo + trimmed.len(),
                ));
            }

            bindings.push(BlockBinding {
                name: StencilAtom::from(trimmed),
                span: span_of(lo, lo + trimmed.len()),
            });
        }

        let mut bindings = bindings.into_iter();
        match (bindings.next(), bindings.next(), bindings.next()) {
            (Some(item), index, None) => Ok(Mustache::Each {
                expression,
                item,
                index,
            }),
            _ => Err(self.error(ParseErrorKind::InvalidEachBlock, args_start, args_end)),
        }
    }

    fn parse_if_block(
        &mut self,
        expression: Box<Expr>,
        start: usize,
        depth: usize,
    ) -> PResult<IfBlock> {
        let (children, stop, stop_start) = self.parse_children(depth + 1)?;

        let else_children = match stop {
            Stop::BlockClose(name) if name == "if" => None,

            Stop::Else => {
                let (else_children, stop, stop_start) = self.parse_children(depth + 1)?;
                self.expect_block_close(stop, "if", start, stop_start)?;
                Some(else_children)
            }

            // The nested block consumes the shared `{{/if}}`
            Stop::ElseIf(nested_expression) => {
                let nested = self.parse_if_block(nested_expression, stop_start, depth)?;
                Some(vec![TemplateNode::IfBlock(nested)])
            }

            other => {
                self.expect_block_close(other, "if", start, stop_start)?;
                None
            }
        };

        Ok(IfBlock {
            expression,
            children,
            else_children,
            span: span_of(start, self.index),
        })
    }

    fn parse_each_block(
        &mut self,
        expression: Box<Expr>,
        item: BlockBinding,
        index: Option<BlockBinding>,
        start: usize,
        depth: usize,
    ) -> PResult<EachBlock> {
        let (children, stop, stop_start) = self.parse_children(depth + 1)?;
        self.expect_block_close(stop, "each", start, stop_start)?;

        Ok(EachBlock {
            expression,
            item,
            index,
            children,
            span: span_of(start, self.index),
        })
    }

    fn expect_block_close(
        &self,
        stop: Stop,
        expected: &str,
        block_start: usize,
        stop_start: usize,
    ) -> PResult<()> {
        let kind = match stop {
            Stop::BlockClose(name) if name == expected => return Ok(()),
            Stop::BlockClose(name) => ParseErrorKind::UnexpectedBlockClose(name),
            Stop::Else | Stop::ElseIf(_) => ParseErrorKind::UnexpectedElse,
            Stop::ClosingTag(name) => ParseErrorKind::UnexpectedClosingTag(name),
            Stop::Eof => {
                return Err(self.error(
                    ParseErrorKind::UnclosedBlock(StencilAtom::from(expected)),
                    block_start,
                    stop_start,
                ))
            }
        };

        Err(self.error(kind, stop_start, self.index))
    }

    /// Parses `{{ expression }}` at the current position
    fn parse_mustache_expression(&mut self) -> PResult<Box<Expr>> {
        let (content_start, content_end) = self.consume_mustache()?;
        self.expression_at(content_start, content_end)
    }

    /// Consumes `{{ ... }}` and returns the byte range of its content
    fn consume_mustache(&mut self) -> PResult<(usize, usize)> {
        let start = self.index;
        let content_start = start + MUSTACHE_START.len();

        let Some(content_len) = find_mustache_end(&self.source[content_start..]) else {
            return Err(self.error(ParseErrorKind::UnclosedMustache, start, self.source.len()));
        };

        let content_end = content_start + content_len;
        self.index = content_end + MUSTACHE_END.len();

        Ok((content_start, content_end))
    }

    /// Parses an expression which must span the whole `start..end` (sans whitespace and comments)
    fn expression_at(&self, start: usize, end: usize) -> PResult<Box<Expr>> {
        let raw = &self.source[start..end];
        let lo = to_byte_pos(start);
        let hi = to_byte_pos(end);

        let expr = parse_expr(raw, self.options.es_version, lo, hi)?;

        // Only whitespace and comments may follow the expression
        let trailing = &self.source[to_offset(expr.span_hi()) as usize..end];
        if !is_trivia(trailing) {
            return Err(ParseError {
                kind: ParseErrorKind::ExpressionTrailingContent,
                span: Span::new(expr.span_hi(), hi),
            });
        }

        Ok(expr)
    }

    #[inline]
    fn rest(&self) -> &'s str {
        &self.source[self.index..]
    }

    #[inline]
    fn eat(&mut self, pat: &str) -> bool {
        if self.rest().starts_with(pat) {
            self.index += pat.len();
            true
        } else {
            false
        }
    }

    fn read_while(&mut self, predicate: impl Fn(char) -> bool) -> &'s str {
        let rest = self.rest();
        let len = rest.find(|c: char| !predicate(c)).unwrap_or(rest.len());
        self.index += len;
        &rest[..len]
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        self.read_while(char::is_whitespace);
    }

    #[inline]
    fn error(&self, kind: ParseErrorKind, start: usize, end: usize) -> ParseError {
        ParseError {
            kind,
            span: span_of(start, end.max(start)),
        }
    }
}

/// Whether `input` starts with something the parser treats as markup
#[inline]
fn starts_tag(input: &str) -> bool {
    let mut chars = input.chars();
    chars.next() == Some('<')
        && matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '/')
        || input.starts_with("<!--")
}

#[inline]
fn is_tag_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | ':' | '_' | '.')
}

#[inline]
fn is_attribute_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '"' | '\'' | '<')
}

/// Checks the name against a simplified ECMAScript identifier grammar
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Finds the end of a mustache content, i.e. the position of the closing `}}`.
/// Braces, string and template literals inside the expression are skipped.
fn find_mustache_end(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut depth = 0usize;
    let mut idx = 0;

    while idx < bytes.len() {
        match bytes[idx] {
            quote @ (b'"' | b'\'' | b'`') => {
                idx += 1;
                while idx < bytes.len() && bytes[idx] != quote {
                    if bytes[idx] == b'\\' {
                        idx += 1;
                    }
                    idx += 1;
                }
            }
            b'{' => depth += 1,
            b'}' if depth > 0 => depth -= 1,
            b'}' if bytes.get(idx + 1) == Some(&b'}') => return Some(idx),
            _ => {}
        }
        idx += 1;
    }

    None
}

/// Offset of the last standalone `as`, e.g. in `items\tas item`
fn find_as_keyword(args: &str) -> Option<usize> {
    args.rmatch_indices("as").map(|(idx, _)| idx).find(|&idx| {
        args[..idx].ends_with(char::is_whitespace)
            && args[idx + "as".len()..].starts_with(char::is_whitespace)
    })
}

/// Whether `input` only has whitespace and ECMAScript comments
fn is_trivia(mut input: &str) -> bool {
    loop {
        input = input.trim_start();

        if let Some(comment) = input.strip_prefix("/*") {
            let Some(end) = comment.find("*/") else {
                return false;
            };
            input = &comment[end + "*/".len()..];
        } else if let Some(comment) = input.strip_prefix("//") {
            input = comment.find('\n').map_or("", |end| &comment[end..]);
        } else {
            return input.is_empty();
        }
    }
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> Template {
        TemplateParser::new(input, &ParseOptions::default())
            .parse_template()
            .expect("input should be parseable")
    }

    fn parse_err(input: &str) -> ParseErrorKind {
        TemplateParser::new(input, &ParseOptions::default())
            .parse_template()
            .expect_err("input should not be parseable")
            .kind
    }

    #[test]
    fn it_finds_mustache_end() {
        assert_eq!(find_mustache_end("foo}}"), Some(3));
        assert_eq!(find_mustache_end(" {a: 1} }}"), Some(8));
        assert_eq!(find_mustache_end(" {a: {b: 1}}}}"), Some(12));
        assert_eq!(find_mustache_end("'}}' + a}}"), Some(8));
        assert_eq!(find_mustache_end("foo"), None);
    }

    #[test]
    fn it_parses_text_and_mustaches() {
        let template = parse("Hello {{name}}!");
        assert_eq!(template.html.len(), 3);

        let TemplateNode::Text(ref text) = template.html[0] else {
            panic!("Expected text");
        };
        assert_eq!(&*text.data, "Hello ");

        let TemplateNode::MustacheTag(ref tag) = template.html[1] else {
            panic!("Expected mustache");
        };
        assert!(matches!(*tag.expression, Expr::Ident(ref ident) if ident.sym == "name"));
        // `name` is at 8..12, spans start from 1
        assert_eq!(tag.expression.span_lo().0, 9);
        assert_eq!(tag.expression.span_hi().0, 13);
    }

    #[test]
    fn it_parses_elements_and_attributes() {
        let template = parse(r#"<input type="text" disabled value="{{a}}-{{b}}"><p class=x></p>"#);
        assert_eq!(template.html.len(), 2);

        let TemplateNode::Element(ref input) = template.html[0] else {
            panic!("Expected element");
        };
        assert_eq!(&*input.name, "input");
        assert!(input.children.is_empty());
        assert_eq!(input.attributes.len(), 3);
        assert!(matches!(input.attributes[1].value, AttributeValue::Boolean));

        let AttributeValue::Parts(ref parts) = input.attributes[2].value else {
            panic!("Expected parts");
        };
        assert_eq!(parts.len(), 3);
        assert!(matches!(parts[0], AttributeValuePart::Expression(_)));
        assert!(matches!(parts[1], AttributeValuePart::Text(ref t) if *t == "-"));
        assert!(matches!(parts[2], AttributeValuePart::Expression(_)));

        let TemplateNode::Element(ref p) = template.html[1] else {
            panic!("Expected element");
        };
        let AttributeValue::Parts(ref parts) = p.attributes[0].value else {
            panic!("Expected parts");
        };
        assert!(matches!(parts[0], AttributeValuePart::Text(ref t) if *t == "x"));
    }

    #[test]
    fn it_parses_blocks() {
        let template = parse(
            "{{#if a}}A{{elseif b}}B{{else}}C{{/if}}{{#each items as item, i}}<li>{{item}}</li>{{/each}}",
        );
        assert_eq!(template.html.len(), 2);

        let TemplateNode::IfBlock(ref if_block) = template.html[0] else {
            panic!("Expected if");
        };
        let Some(ref else_children) = if_block.else_children else {
            panic!("Expected else");
        };
        let TemplateNode::IfBlock(ref nested) = else_children[0] else {
            panic!("Expected nested if");
        };
        assert!(nested.else_children.is_some());

        let TemplateNode::EachBlock(ref each_block) = template.html[1] else {
            panic!("Expected each");
        };
        assert_eq!(&*each_block.item.name, "item");
        assert_eq!(each_block.index.as_ref().map(|it| &*it.name), Some("i"));
        assert_eq!(each_block.children.len(), 1);
    }

    #[test]
    fn it_extracts_script_and_style() {
        let template = parse("<p>x</p>\n<script>\nexport default {};\n</script>\n<style>p {}</style>");
        assert!(template.script.is_some());
        assert!(template.css.is_some());
        // `<p>` and two newlines
        assert_eq!(template.html.len(), 3);
    }

    #[test]
    fn it_keeps_lone_angle_brackets_as_text() {
        let template = parse("a < b");
        assert_eq!(template.html.len(), 1);
    }

    #[test]
    fn it_keeps_comments_as_text() {
        let template = parse("<!-- keep --><p>x</p>");
        assert_eq!(template.html.len(), 2);

        let TemplateNode::Text(ref text) = template.html[0] else {
            panic!("Expected text");
        };
        assert_eq!(&*text.data, "<!-- keep -->");
        assert_eq!(text.span, span_of(0, 13));

        // Mustaches inside comments are not interpolations
        let template = parse("a<!-- {{b}} -->");
        assert_eq!(template.html.len(), 2);
        assert!(matches!(
            template.html[1],
            TemplateNode::Text(ref t) if &*t.data == "<!-- {{b}} -->"
        ));
    }

    #[test]
    fn it_allows_comments_after_expressions() {
        let template = parse("{{ a /* note */ }}{{ b // note\n }}");
        assert_eq!(template.html.len(), 2);
        assert!(matches!(template.html[0], TemplateNode::MustacheTag(_)));
        assert!(matches!(
            parse_err("{{ a /* note */ b }}"),
            ParseErrorKind::ExpressionTrailingContent
        ));
        assert!(matches!(
            parse_err("{{ a /* note }}"),
            ParseErrorKind::ExpressionTrailingContent | ParseErrorKind::BadExpr(_)
        ));
    }

    #[test]
    fn it_splits_each_headers_on_any_whitespace() {
        for input in [
            "{{#each items\tas item}}{{/each}}",
            "{{#each items  as  item , i}}{{/each}}",
            "{{#each alias.map(x => x.as) as item}}{{/each}}",
        ] {
            let template = parse(input);
            let TemplateNode::EachBlock(ref each_block) = template.html[0] else {
                panic!("Expected each");
            };
            assert_eq!(&*each_block.item.name, "item");
        }
        assert!(matches!(
            parse_err("{{#each items as}}{{/each}}"),
            ParseErrorKind::InvalidEachBlock
        ));
    }

    #[test]
    fn it_reports_errors() {
        assert!(matches!(parse_err("<div>"), ParseErrorKind::UnclosedElement(_)));
        assert!(matches!(parse_err("</div>"), ParseErrorKind::UnexpectedClosingTag(_)));
        assert!(matches!(parse_err("{{#if a}}"), ParseErrorKind::UnclosedBlock(_)));
        assert!(matches!(parse_err("{{/each}}"), ParseErrorKind::UnexpectedBlockClose(_)));
        assert!(matches!(parse_err("{{else}}"), ParseErrorKind::UnexpectedElse));
        assert!(matches!(parse_err("{{#unless a}}{{/unless}}"), ParseErrorKind::UnknownBlock(_)));
        assert!(matches!(parse_err("{{#each items}}{{/each}}"), ParseErrorKind::InvalidEachBlock));
        assert!(matches!(
            parse_err("{{#each items as 1}}{{/each}}"),
            ParseErrorKind::InvalidBindingName(_)
        ));
        assert!(matches!(parse_err("{{ a b }}"), ParseErrorKind::ExpressionTrailingContent));
        assert!(matches!(parse_err("{{ a"), ParseErrorKind::UnclosedMustache));
        assert!(matches!(
            parse_err("<div><script></script></div>"),
            ParseErrorKind::NestedScriptOrStyle(_)
        ));
        assert!(matches!(
            parse_err("<script></script><script></script>"),
            ParseErrorKind::DuplicateScript
        ));
    }
}
