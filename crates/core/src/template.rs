use crate::model::{AlbumRecord, PhotoRecord, RenderContext};
use crate::resolver::album_for_dest_path;
use crate::sanitize::{is_separator, sanitize_dirname};
use crate::sequence::render_album_sequence;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Token(Token),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    AlbumSeq,
    Album,
    OrigName,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template is empty")]
    Empty,
    #[error("unbalanced braces in template")]
    UnbalancedBraces,
    #[error("unknown template token: {0}")]
    UnknownToken(String),
}

pub fn validate_template(input: &str) -> Result<(), TemplateError> {
    parse_template(input).map(|_| ())
}

pub fn parse_template(input: &str) -> Result<Vec<TemplatePart>, TemplateError> {
    if input.is_empty() {
        return Err(TemplateError::Empty);
    }

    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                if !literal.is_empty() {
                    parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                }
                let mut token = String::new();
                let mut found_close = false;
                for next in chars.by_ref() {
                    if next == '}' {
                        found_close = true;
                        break;
                    }
                    if next == '{' {
                        return Err(TemplateError::UnbalancedBraces);
                    }
                    token.push(next);
                }
                if !found_close || token.is_empty() {
                    return Err(TemplateError::UnbalancedBraces);
                }
                parts.push(TemplatePart::Token(parse_token(&token)?));
            }
            '}' => return Err(TemplateError::UnbalancedBraces),
            _ => literal.push(ch),
        }
    }

    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(literal));
    }

    Ok(parts)
}

/// Renders an export filename for `photo` in the directory carried by `ctx`.
///
/// A token that renders empty takes the separators of the literal next to it
/// along, so `{album_seq}_{orig_name}` becomes the plain original name outside
/// album folders. Token values themselves are never rewritten.
pub fn render_filename<P: PhotoRecord>(
    parts: &[TemplatePart],
    photo: &P,
    ctx: &RenderContext,
    start: u64,
) -> String {
    let mut output = String::new();
    // Start of the literal just pushed, while it is still the last part.
    let mut last_literal: Option<usize> = None;
    let mut trim_next_literal = false;

    for part in parts {
        match part {
            TemplatePart::Literal(s) => {
                let s = if trim_next_literal {
                    s.trim_start_matches(is_separator)
                } else {
                    s.as_str()
                };
                trim_next_literal = false;
                last_literal = Some(output.len());
                output.push_str(s);
            }
            TemplatePart::Token(token) => {
                let value = render_token(*token, photo, ctx, start);
                if !value.is_empty() {
                    output.push_str(&value);
                } else if let Some(literal_start) = last_literal {
                    let kept = output.trim_end_matches(is_separator).len();
                    output.truncate(kept.max(literal_start));
                } else if output.is_empty() {
                    trim_next_literal = true;
                }
                last_literal = None;
            }
        }
    }

    output
}

fn render_token<P: PhotoRecord>(
    token: Token,
    photo: &P,
    ctx: &RenderContext,
    start: u64,
) -> String {
    match token {
        Token::AlbumSeq => render_album_sequence(photo, ctx, start),
        Token::Album => ctx
            .dest_path
            .as_deref()
            .and_then(|dest| album_for_dest_path(photo, dest))
            .map(|album| sanitize_dirname(album.title()))
            .unwrap_or_default(),
        Token::OrigName => photo.original_name().to_string(),
    }
}

fn parse_token(token: &str) -> Result<Token, TemplateError> {
    match token {
        "album_seq" => Ok(Token::AlbumSeq),
        "album" => Ok(Token::Album),
        "orig_name" => Ok(Token::OrigName),
        other => Err(TemplateError::UnknownToken(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AlbumInfo, PhotoInfo};

    fn photo() -> PhotoInfo {
        PhotoInfo::new(
            "p1",
            "IMG_0001.jpg",
            vec![AlbumInfo::new("Trip", &["2020"], &["a", "p1"])],
        )
    }

    #[test]
    fn parse_template_ok() {
        let parsed = parse_template("{album_seq}_{orig_name}").expect("must parse");
        assert_eq!(
            parsed,
            vec![
                TemplatePart::Token(Token::AlbumSeq),
                TemplatePart::Literal("_".to_string()),
                TemplatePart::Token(Token::OrigName),
            ]
        );
    }

    #[test]
    fn parse_template_invalid_unknown() {
        let err = parse_template("{folder_album}").expect_err("must fail");
        assert_eq!(err, TemplateError::UnknownToken("folder_album".to_string()));
    }

    #[test]
    fn parse_template_invalid_brace() {
        assert_eq!(
            parse_template("{album_seq").expect_err("must fail"),
            TemplateError::UnbalancedBraces
        );
        assert_eq!(
            parse_template("album_seq}").expect_err("must fail"),
            TemplateError::UnbalancedBraces
        );
        assert_eq!(
            validate_template("").expect_err("must fail"),
            TemplateError::Empty
        );
    }

    #[test]
    fn render_prefixes_sequence_inside_album_folder() {
        let parts = parse_template("{album_seq}_{orig_name}").expect("must parse");
        let ctx = RenderContext::with_dest("/export/2020/Trip");
        assert_eq!(render_filename(&parts, &photo(), &ctx, 1), "2_IMG_0001.jpg");
    }

    #[test]
    fn render_drops_prefix_outside_album_folder() {
        let parts = parse_template("{album_seq}_{orig_name}").expect("must parse");
        let ctx = RenderContext::with_dest("/export");
        assert_eq!(render_filename(&parts, &photo(), &ctx, 1), "IMG_0001.jpg");
    }

    #[test]
    fn render_album_title_token() {
        let parts = parse_template("{album}-{album_seq}-{orig_name}").expect("must parse");
        let ctx = RenderContext::with_dest("/export/2020/Trip");
        assert_eq!(
            render_filename(&parts, &photo(), &ctx, 0),
            "Trip-1-IMG_0001.jpg"
        );
    }

    #[test]
    fn render_keeps_original_name_untouched() {
        let mut p = photo();
        p.original_name = "IMG__0001 - copy.jpg".to_string();
        let parts = parse_template("{album_seq}_{orig_name}").expect("must parse");

        let in_album = RenderContext::with_dest("/export/2020/Trip");
        assert_eq!(
            render_filename(&parts, &p, &in_album, 0),
            "1_IMG__0001 - copy.jpg"
        );

        let flat = RenderContext::with_dest("/export");
        assert_eq!(render_filename(&parts, &p, &flat, 0), "IMG__0001 - copy.jpg");
    }

    #[test]
    fn render_keeps_separators_at_name_edges() {
        let mut p = photo();
        p.original_name = "_IMG_0001_.jpg".to_string();
        let parts = parse_template("{album_seq}_{orig_name}").expect("must parse");
        let flat = RenderContext::with_dest("/export");
        assert_eq!(render_filename(&parts, &p, &flat, 0), "_IMG_0001_.jpg");
    }

    #[test]
    fn render_drops_separator_before_trailing_empty_token() {
        let parts = parse_template("{orig_name}-{album_seq}").expect("must parse");
        let flat = RenderContext::with_dest("/export");
        assert_eq!(render_filename(&parts, &photo(), &flat, 0), "IMG_0001.jpg");

        let parts = parse_template("x_{album}_{orig_name}").expect("must parse");
        assert_eq!(render_filename(&parts, &photo(), &flat, 0), "x_IMG_0001.jpg");
    }
}
