//! `fieldcheck check`: run a string validator over command line values.

use anyhow::Context;
use fieldcheck::{
    ContractViolation, DomainPolicy, EmailOptions, NameOptions, PasswordOptions, PhoneOptions,
    TextareaOptions, UsernameOptions, ValidationResult, validate_email, validate_name,
    validate_password, validate_phone, validate_surname, validate_textarea, validate_username,
};
use serde::de::DeserializeOwned;

use crate::cli::{CheckArgs, Validator};
use crate::options::load_options;
use crate::report::{CheckEntry, CheckReport};

/// Flags that only some validators understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    MinLength,
    MaxLength,
    Country,
    Domains,
    DefaultDomains,
    Format,
    Require,
}

impl Flag {
    fn as_str(self) -> &'static str {
        match self {
            Self::MinLength => "--min-length",
            Self::MaxLength => "--max-length",
            Self::Country => "--country",
            Self::Domains => "--domains",
            Self::DefaultDomains => "--default-domains",
            Self::Format => "--format",
            Self::Require => "--require",
        }
    }
}

fn flags_given(args: &CheckArgs) -> Vec<Flag> {
    [
        (args.min_length.is_some(), Flag::MinLength),
        (args.max_length.is_some(), Flag::MaxLength),
        (args.country.is_some(), Flag::Country),
        (!args.domains.is_empty(), Flag::Domains),
        (args.default_domains, Flag::DefaultDomains),
        (args.format.is_some(), Flag::Format),
        (!args.require.is_empty(), Flag::Require),
    ]
    .into_iter()
    .filter_map(|(given, flag)| given.then_some(flag))
    .collect()
}

fn supported_flags(validator: Validator) -> &'static [Flag] {
    match validator {
        Validator::Name | Validator::Surname | Validator::Username => {
            &[Flag::MinLength, Flag::MaxLength]
        }
        Validator::Email => &[
            Flag::MaxLength,
            Flag::Country,
            Flag::Domains,
            Flag::DefaultDomains,
        ],
        Validator::Phone => &[Flag::Format],
        Validator::Password => &[Flag::MinLength, Flag::MaxLength, Flag::Require],
        Validator::Textarea => &[Flag::MaxLength],
    }
}

fn base_options<T: DeserializeOwned + Default>(args: &CheckArgs) -> anyhow::Result<T> {
    args.options
        .as_deref()
        .map_or_else(|| Ok(T::default()), load_options::<T>)
}

fn validate_all<O>(
    values: &[String],
    options: &O,
    validate: impl Fn(&str, &O) -> Result<ValidationResult, ContractViolation>,
) -> Result<Vec<CheckEntry>, ContractViolation> {
    values
        .iter()
        .map(|value| {
            Ok(CheckEntry {
                value: value.clone(),
                result: validate(value, options)?,
            })
        })
        .collect()
}

/// Validate every value in `args` with the selected validator.
///
/// Options come from `--options` first; flags override them.
///
/// # Errors
///
/// Returns an error if a flag does not apply to the validator, the options
/// file cannot be loaded, or the options break the validator's contract.
pub fn check_values(args: &CheckArgs) -> anyhow::Result<CheckReport> {
    let validator = args.validator;
    let supported = supported_flags(validator);
    if let Some(flag) = flags_given(args)
        .into_iter()
        .find(|flag| !supported.contains(flag))
    {
        anyhow::bail!(
            "{} does not apply to the {} validator",
            flag.as_str(),
            validator.as_str()
        );
    }

    let results = match validator {
        Validator::Name | Validator::Surname => {
            let mut options: NameOptions = base_options(args)?;
            options.min_length = args.min_length.or(options.min_length);
            options.max_length = args.max_length.or(options.max_length);
            if validator == Validator::Name {
                validate_all(&args.values, &options, validate_name)
            } else {
                validate_all(&args.values, &options, validate_surname)
            }
        }
        Validator::Username => {
            let mut options: UsernameOptions = base_options(args)?;
            options.min_length = args.min_length.or(options.min_length);
            options.max_length = args.max_length.or(options.max_length);
            validate_all(&args.values, &options, validate_username)
        }
        Validator::Email => {
            let mut options: EmailOptions = base_options(args)?;
            options.max_length = args.max_length.or(options.max_length);
            if args.country.is_some() {
                options.country.clone_from(&args.country);
            }
            if args.default_domains {
                options.valid_domains = DomainPolicy::Default;
            } else if !args.domains.is_empty() {
                options.valid_domains = DomainPolicy::Only(args.domains.clone());
            }
            validate_all(&args.values, &options, validate_email)
        }
        Validator::Phone => {
            let mut options: PhoneOptions = base_options(args)?;
            if args.format.is_some() {
                options.format.clone_from(&args.format);
            }
            validate_all(&args.values, &options, validate_phone)
        }
        Validator::Password => {
            let mut options: PasswordOptions = base_options(args)?;
            options.min_length = args.min_length.or(options.min_length);
            options.max_length = args.max_length.or(options.max_length);
            if !args.require.is_empty() {
                options.require.clone_from(&args.require);
            }
            validate_all(&args.values, &options, validate_password)
        }
        Validator::Textarea => {
            let mut options: TextareaOptions = base_options(args)?;
            options.max_length = args.max_length.or(options.max_length);
            validate_all(&args.values, &options, validate_textarea)
        }
    }
    .with_context(|| format!("invalid {} options", validator.as_str()))?;

    let report = CheckReport::new(validator.as_str(), results);
    tracing::info!(
        validator = report.validator,
        values = report.results.len(),
        invalid = report.invalid_count(),
        "check finished"
    );
    Ok(report)
}
