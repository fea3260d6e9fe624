//! Formatter options and their command-line form
//!
//! Every option the formatter accepts is described once in [`DESCRIPTORS`].
//! Serialization walks that table in order, so the emitted flags always come
//! out in the same sequence: `-l -w -r -s -d -e -cpuprofile`.

use serde::{Deserialize, Serialize};

/// Options forwarded verbatim to every formatter invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// List files whose formatting differs from the formatter's
    pub list: bool,

    /// Write result to (source) file instead of stdout
    pub write: bool,

    /// Rewrite rule (e.g., 'a[b:len(a)] -> a[b:]')
    pub rewrite_rule: String,

    /// Simplify code
    pub simplify_ast: bool,

    /// Display diffs instead of rewriting files
    pub do_diff: bool,

    /// Report all errors (not just the first 10 on different lines)
    pub all_errors: bool,

    /// Write cpu profile to this file
    pub cpuprofile: String,
}

/// The two value shapes a formatter option can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionValue<'a> {
    Flag(bool),
    Text(&'a str),
}

impl OptionValue<'_> {
    /// Whether this value is the option's default (false / empty)
    pub fn is_default(&self) -> bool {
        match self {
            OptionValue::Flag(enabled) => !enabled,
            OptionValue::Text(text) => text.is_empty(),
        }
    }
}

/// Static description of one formatter option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDescriptor {
    /// Field name in [`FormatOptions`] and in the config file
    pub field: &'static str,
    /// Flag name as the formatter spells it, without the leading dash
    pub flag: &'static str,
}

impl OptionDescriptor {
    const fn new(field: &'static str, flag: &'static str) -> Self {
        Self { field, flag }
    }

    /// The flag as passed on the command line
    pub fn switch(&self) -> String {
        format!("-{}", self.flag)
    }
}

/// Descriptor table, in emission order. Must stay aligned with `FormatOptions::values`.
pub static DESCRIPTORS: [OptionDescriptor; 7] = [
    OptionDescriptor::new("list", "l"),
    OptionDescriptor::new("write", "w"),
    OptionDescriptor::new("rewrite_rule", "r"),
    OptionDescriptor::new("simplify_ast", "s"),
    OptionDescriptor::new("do_diff", "d"),
    OptionDescriptor::new("all_errors", "e"),
    OptionDescriptor::new("cpuprofile", "cpuprofile"),
];

impl FormatOptions {
    fn values(&self) -> [OptionValue<'_>; 7] {
        [
            OptionValue::Flag(self.list),
            OptionValue::Flag(self.write),
            OptionValue::Text(&self.rewrite_rule),
            OptionValue::Flag(self.simplify_ast),
            OptionValue::Flag(self.do_diff),
            OptionValue::Flag(self.all_errors),
            OptionValue::Text(&self.cpuprofile),
        ]
    }

    /// Pair every descriptor with its current value
    pub fn entries(&self) -> impl Iterator<Item = (&'static OptionDescriptor, OptionValue<'_>)> {
        DESCRIPTORS.iter().zip(self.values())
    }

    /// Serialize into command-line tokens, skipping options left at their default
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        for (descriptor, value) in self.entries() {
            if value.is_default() {
                continue;
            }
            args.push(descriptor.switch());
            if let OptionValue::Text(text) = value {
                args.push(text.to_string());
            }
        }

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_options_emit_nothing() {
        let options = FormatOptions::default();
        assert!(options.to_args().is_empty());
        assert!(options.is_empty());
    }

    #[test]
    fn test_list_only() {
        let options = FormatOptions {
            list: true,
            write: false,
            rewrite_rule: String::new(),
            ..Default::default()
        };
        assert_eq!(options.to_args(), vec!["-l"]);
    }

    #[test]
    fn test_write_with_rewrite_rule() {
        let options = FormatOptions {
            write: true,
            rewrite_rule: "a[b:len(a)] -> a[b:]".to_string(),
            ..Default::default()
        };
        assert_eq!(options.to_args(), vec!["-w", "-r", "a[b:len(a)] -> a[b:]"]);
    }

    #[test]
    fn test_all_options_follow_declaration_order() {
        let options = FormatOptions {
            list: true,
            write: true,
            rewrite_rule: "x -> y".to_string(),
            simplify_ast: true,
            do_diff: true,
            all_errors: true,
            cpuprofile: "cpu.out".to_string(),
        };
        assert_eq!(
            options.to_args(),
            vec!["-l", "-w", "-r", "x -> y", "-s", "-d", "-e", "-cpuprofile", "cpu.out"]
        );
    }

    #[test]
    fn test_boolean_flag_present_iff_true() {
        for mask in 0u8..16 {
            let options = FormatOptions {
                simplify_ast: mask & 1 != 0,
                do_diff: mask & 2 != 0,
                all_errors: mask & 4 != 0,
                write: mask & 8 != 0,
                ..Default::default()
            };
            let args = options.to_args();
            assert_eq!(args.contains(&"-s".to_string()), options.simplify_ast);
            assert_eq!(args.contains(&"-d".to_string()), options.do_diff);
            assert_eq!(args.contains(&"-e".to_string()), options.all_errors);
            assert_eq!(args.contains(&"-w".to_string()), options.write);
            assert!(!args.contains(&"-l".to_string()));
        }
    }

    #[test]
    fn test_empty_string_option_contributes_nothing() {
        let options = FormatOptions {
            cpuprofile: String::new(),
            rewrite_rule: "a -> b".to_string(),
            ..Default::default()
        };
        let args = options.to_args();
        assert!(!args.contains(&"-cpuprofile".to_string()));
        assert_eq!(args, vec!["-r", "a -> b"]);
    }

    #[test]
    fn test_descriptors_are_unique() {
        let flags: HashSet<_> = DESCRIPTORS.iter().map(|d| d.flag).collect();
        let fields: HashSet<_> = DESCRIPTORS.iter().map(|d| d.field).collect();
        assert_eq!(flags.len(), DESCRIPTORS.len());
        assert_eq!(fields.len(), DESCRIPTORS.len());
    }

    #[test]
    fn test_descriptor_fields_match_serde_names() {
        let options = FormatOptions {
            list: true,
            ..Default::default()
        };
        let value = serde_json::to_value(&options).unwrap();
        let object = value.as_object().unwrap();
        for descriptor in DESCRIPTORS.iter() {
            assert!(object.contains_key(descriptor.field), "missing {}", descriptor.field);
        }
        assert_eq!(object.len(), DESCRIPTORS.len());
    }
}
