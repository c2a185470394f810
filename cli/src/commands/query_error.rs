use std::ops::Range;

use bboxgate_core::{
    parse::{ParseOptions, Scheme},
    GatewayError, RequestParams,
};
use thiserror::Error;
use yansi::Paint;

/// An error that happened while running a query
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("{0}")]
    Rejected(String),
}

/// Convert a [GatewayError] into a [QueryError] that points at the
/// offending part of the input where possible
pub trait IntoQueryError {
    fn into_query_error(self, params: &RequestParams, options: &ParseOptions) -> QueryError;
}

/// Byte ranges of the tokens of a raw bbox, trimmed like the parser trims
/// them
fn token_spans(input: &str, scheme: Scheme) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    match scheme {
        Scheme::Comma => {
            let mut start = 0;
            for token in input.split(',') {
                let lead = token.len() - token.trim_start().len();
                let len = token.trim().len();
                spans.push(start + lead..start + lead + len);
                start += token.len() + 1;
            }
        }

        Scheme::Space => {
            let mut current = None;
            for (i, c) in input.char_indices() {
                if c.is_whitespace() {
                    if let Some(s) = current.take() {
                        spans.push(s..i);
                    }
                } else if current.is_none() {
                    current = Some(i);
                }
            }
            if let Some(s) = current {
                spans.push(s..input.len());
            }
        }
    }
    spans
}

/// Find the span of the bbox token the error refers to
fn error_span(err: &GatewayError, input: &str, options: &ParseOptions) -> Option<Range<usize>> {
    let index = match err {
        GatewayError::InvalidCoordinate { corner, axis, .. }
        | GatewayError::OutOfRangeCoordinate { corner, axis, .. } => options
            .order
            .positions()
            .iter()
            .position(|p| *p == (*corner, *axis))?,
        GatewayError::TooManyCoordinates { .. } => 4,
        _ => return None,
    };

    // a missing token is reported at the end of the input
    Some(
        token_spans(input, options.scheme)
            .get(index)
            .cloned()
            .unwrap_or(input.len()..input.len()),
    )
}

fn render(input: &str, span: Range<usize>, msg: &str) -> String {
    let span_len = span.end - span.start;
    let prefix = input[..span.start].chars().count();
    let center_prefix = ((span_len + 1) / 2).saturating_sub(1);
    let center_suffix = span_len / 2;
    format!(
        "Invalid bounding box\n\n{}{}{}\n{}{}{}{}\n{}{}{}",
        &input[..span.start],
        input[span.clone()].red(),
        &input[span.end..],
        " ".repeat(prefix),
        "─".repeat(center_prefix).red(),
        (if span_len > 0 { "┬" } else { "│" }).red(),
        "─".repeat(center_suffix).red(),
        " ".repeat(prefix + center_prefix),
        "╰── ".red(),
        msg.red().bold()
    )
}

impl IntoQueryError for GatewayError {
    fn into_query_error(self, params: &RequestParams, options: &ParseOptions) -> QueryError {
        let msg = self.to_string();

        // errors of encoded ranges are reported without a snippet
        let span = params
            .bbox
            .as_deref()
            .and_then(|input| error_span(&self, input, options).map(|span| (input, span)));

        match span {
            Some((input, span)) => QueryError::Rejected(render(input, span, &msg)),
            None => QueryError::Rejected(msg.red().bold().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use bboxgate_core::{
        bbox::{Axis, Corner},
        parse::{Order, ParseOptions, Scheme},
        GatewayError, RequestParams,
    };
    use pretty_assertions::assert_eq;

    use super::{token_spans, IntoQueryError};

    fn rendered(err: GatewayError, bbox: &str, options: ParseOptions) -> String {
        yansi::disable();
        let params = RequestParams {
            bbox: Some(bbox.to_string()),
            ..Default::default()
        };
        err.into_query_error(&params, &options).to_string()
    }

    #[test]
    fn comma_spans() {
        assert_eq!(token_spans("1, 2 ,33,", Scheme::Comma), vec![0..1, 3..4, 6..8, 9..9]);
    }

    #[test]
    fn space_spans() {
        assert_eq!(token_spans("  1 22   3", Scheme::Space), vec![2..3, 4..6, 9..10]);
    }

    #[test]
    fn out_of_range() {
        let err = GatewayError::OutOfRangeCoordinate {
            corner: Corner::SouthWest,
            axis: Axis::Latitude,
            value: 200.0,
        };
        assert_eq!(
            rendered(err, "200,0,10,10", ParseOptions::default()),
            "Invalid bounding box\n\n\
             200,0,10,10\n\
             ─┬─\n \
             ╰── E_IMPOSSIBLE_LATITUDE (SW)"
        );
    }

    #[test]
    fn lonlat_order() {
        let err = GatewayError::OutOfRangeCoordinate {
            corner: Corner::SouthWest,
            axis: Axis::Latitude,
            value: 95.0,
        };
        let options = ParseOptions {
            order: Order::LonLat,
            ..Default::default()
        };
        assert_eq!(
            rendered(err, "10,95,20,30", options),
            "Invalid bounding box\n\n\
             10,95,20,30\n   \
             ┬─\n   \
             ╰── E_IMPOSSIBLE_LATITUDE (SW)"
        );
    }

    #[test]
    fn missing_token() {
        let err = GatewayError::InvalidCoordinate {
            corner: Corner::NorthEast,
            axis: Axis::Longitude,
            token: String::new(),
        };
        assert_eq!(
            rendered(err, "1,2,3", ParseOptions::default()),
            "Invalid bounding box\n\n\
             1,2,3\n     \
             │\n     \
             ╰── E_INVALID_LONGITUDE (NE): missing coordinate"
        );
    }

    #[test]
    fn without_snippet() {
        yansi::disable();
        let err = GatewayError::MissingSpatialParameter;
        assert_eq!(
            err.into_query_error(&RequestParams::default(), &ParseOptions::default())
                .to_string(),
            "E_MISSING_SPATIAL_PARAMETER: missing bbox or marc parameter"
        );
    }
}
