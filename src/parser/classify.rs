//! Change block classification.
//!
//! Turns one raw block into a [`ResourceChange`]: the address from the header
//! line, type and name from the address, and the diff from the first
//! indicator line onward.

use tracing::trace;

use crate::error::ParseError;
use crate::plan::{map_indicator, ChangeType, ResourceChange};

use super::extract::RawBlock;

/// Keywords that may follow an indicator on the diff's first line.
const DIFF_KEYWORDS: &[&str] = &["resource", "data"];

/// Parses a block into a resource change for the given section.
///
/// # Errors
///
/// Returns [`ParseError::MalformedChangeBlock`] if the address does not
/// split into a type and a name, or if no indicator line is found, and
/// [`ParseError::UnrecognizedAction`] if the indicator is unknown.
pub fn classify(block: &RawBlock<'_>, change_type: ChangeType) -> Result<ResourceChange, ParseError> {
    let header = block.text.lines().next().unwrap_or_default();
    let address = header
        .strip_prefix("  # ")
        .and_then(|rest| rest.split_whitespace().next())
        .ok_or_else(|| ParseError::malformed("missing resource address", 0, block.line))?;

    let (resource_type, name) = split_address(address).ok_or_else(|| {
        ParseError::malformed(
            format!("address {address:?} has no resource type and name"),
            1,
            block.line,
        )
    })?;

    let (token, diff_start) = find_indicator(block.text).ok_or_else(|| {
        ParseError::malformed(
            format!("no change indicator followed by `resource` for {address}"),
            3,
            block.line,
        )
    })?;
    let actions = map_indicator(token)?;

    trace!(%address, indicator = token, "Classified change block");
    Ok(ResourceChange {
        change_type,
        address: address.to_string(),
        resource_type: resource_type.to_string(),
        name: name.to_string(),
        actions,
        diff: block.text[diff_start..].to_string(),
    })
}

/// Splits an address into its last two dot-separated segments.
///
/// Dots inside `[...]` index keys do not separate segments. Everything before
/// the last two segments is the module path and is left in the address.
pub(crate) fn split_address(address: &str) -> Option<(&str, &str)> {
    let mut dots = Vec::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut escaped = false;

    for (idx, ch) in address.char_indices() {
        if in_quotes {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_quotes = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_quotes = true,
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => dots.push(idx),
            _ => {}
        }
    }

    let last = *dots.last()?;
    let type_start = dots.len().checked_sub(2).map_or(0, |i| dots[i] + 1);
    let resource_type = &address[type_start..last];
    let name = &address[last + 1..];
    (!resource_type.is_empty() && !name.is_empty()).then_some((resource_type, name))
}

/// Finds the first line whose leading token is a run of punctuation followed
/// by ` resource "` or ` data "`.
///
/// The quote keeps attribute lines such as `+ data = {` from matching.
///
/// Returns the token and its byte offset in `text`.
fn find_indicator(text: &str) -> Option<(&str, usize)> {
    let mut offset = 0;
    for raw in text.split_inclusive('\n') {
        let trimmed = raw.trim_start_matches(' ');
        let token_start = offset + (raw.len() - trimmed.len());
        offset += raw.len();

        let Some((token, rest)) = trimmed.split_once(' ') else {
            continue;
        };
        if token.is_empty() || !token.chars().all(|c| c.is_ascii_punctuation()) {
            continue;
        }
        let is_diff_line = DIFF_KEYWORDS.iter().any(|keyword| {
            rest.strip_prefix(keyword)
                .is_some_and(|after| after.starts_with(" \""))
        });
        if is_diff_line {
            return Some((token, token_start));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Action;

    fn block(text: &str) -> RawBlock<'_> {
        RawBlock { text, line: 1 }
    }

    #[test]
    fn test_classify_update() {
        let text = concat!(
            "  # aws_iam_policy.policy4 has changed\n",
            "  ~ resource \"aws_iam_policy\" \"policy4\" {\n",
            "        id          = \"arn:aws:iam::941738800554:policy/test_policy_4\"\n",
            "      + tags        = {}\n",
            "        # (6 unchanged attributes hidden)\n",
            "    }",
        );
        let change = classify(&block(text), ChangeType::OutsideChange).unwrap();
        assert_eq!(change.address, "aws_iam_policy.policy4");
        assert_eq!(change.resource_type, "aws_iam_policy");
        assert_eq!(change.name, "policy4");
        assert_eq!(change.actions.as_slice(), &[Action::Update]);
        assert_eq!(change.change_type, ChangeType::OutsideChange);
        assert_eq!(
            change.diff,
            concat!(
                "~ resource \"aws_iam_policy\" \"policy4\" {\n",
                "        id          = \"arn:aws:iam::941738800554:policy/test_policy_4\"\n",
                "      + tags        = {}\n",
                "        # (6 unchanged attributes hidden)\n",
                "    }",
            )
        );
    }

    #[test]
    fn test_classify_replace_skips_prose() {
        let text = concat!(
            "  # aws_iam_policy.policy3 must be replaced\n",
            "  # (because the name changed)\n",
            "-/+ resource \"aws_iam_policy\" \"policy3\" {\n",
            "      ~ name = \"test_policy_3\" -> \"new_test_policy_3\" # forces replacement\n",
            "    }",
        );
        let change = classify(&block(text), ChangeType::ActionChange).unwrap();
        assert!(change.actions.is_replace());
        assert!(change.diff.starts_with("-/+ resource"));
    }

    #[test]
    fn test_module_address_kept_whole() {
        let text = "  # module.east.aws_sqs_queue.app_queue will be created\n  + resource \"aws_sqs_queue\" \"app_queue\" {\n    }";
        let change = classify(&block(text), ChangeType::ActionChange).unwrap();
        assert_eq!(change.address, "module.east.aws_sqs_queue.app_queue");
        assert_eq!(change.resource_type, "aws_sqs_queue");
        assert_eq!(change.name, "app_queue");
    }

    #[test]
    fn test_split_address_with_index_keys() {
        assert_eq!(
            split_address("aws_instance.web[\"a.b\"]"),
            Some(("aws_instance", "web[\"a.b\"]"))
        );
        assert_eq!(
            split_address("module.app[\"eu.west\"].aws_instance.web[0]"),
            Some(("aws_instance", "web[0]"))
        );
        assert_eq!(split_address("data.aws_ami.ubuntu"), Some(("aws_ami", "ubuntu")));
    }

    #[test]
    fn test_split_address_rejects_single_segment() {
        assert_eq!(split_address("aws_instance"), None);
        assert_eq!(split_address("aws_instance."), None);
        assert_eq!(split_address(".web"), None);
    }

    #[test]
    fn test_address_without_dot_is_malformed() {
        let text = "  # orphan will be created\n  + resource \"x\" \"y\" {\n    }";
        let err = classify(&block(text), ChangeType::ActionChange).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedChangeBlock { captured: 1, .. }
        ));
    }

    #[test]
    fn test_missing_indicator_is_malformed() {
        let text = "  # a.b will be created\n      + id = (known after apply)\n    }";
        let err = classify(&block(text), ChangeType::ActionChange).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedChangeBlock { captured: 3, .. }
        ));
    }

    #[test]
    fn test_attribute_named_like_keyword_is_not_an_indicator() {
        let text = concat!(
            "  # kubernetes_secret.creds will be created\n",
            "      + data = \"x\"\n",
            "      + resource = {\n",
            "        }\n",
            "    }",
        );
        let err = classify(&block(text), ChangeType::ActionChange).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedChangeBlock { captured: 3, .. }
        ));
    }

    #[test]
    fn test_data_attribute_inside_block_is_kept_in_diff() {
        let text = concat!(
            "  # kubernetes_config_map.app will be updated in-place\n",
            "  ~ resource \"kubernetes_config_map\" \"app\" {\n",
            "      ~ data = {\n",
            "          ~ \"key\" = \"a\" -> \"b\"\n",
            "        }\n",
            "    }",
        );
        let change = classify(&block(text), ChangeType::ActionChange).unwrap();
        assert!(change.actions.is_update());
        assert!(change.diff.starts_with("~ resource \"kubernetes_config_map\""));
    }

    #[test]
    fn test_read_indicator_is_unrecognized() {
        let text = "  # data.aws_ami.ubuntu will be read during apply\n <= data \"aws_ami\" \"ubuntu\" {\n    }";
        assert_eq!(
            classify(&block(text), ChangeType::ActionChange),
            Err(ParseError::unrecognized_action("<="))
        );
    }

    #[test]
    fn test_prose_word_before_resource_is_not_an_indicator() {
        let text = concat!(
            "  # a.b will be created\n",
            "  Some resource text\n",
            "  + resource \"a\" \"b\" {\n",
            "    }",
        );
        let change = classify(&block(text), ChangeType::ActionChange).unwrap();
        assert!(change.actions.is_create());
    }
}
