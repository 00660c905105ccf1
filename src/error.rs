// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parse errors shared by the identifier types.

use thiserror::Error;

/// Error creating a [Sid](crate::sid::Sid), [Release](crate::release::Release) or
/// [ReleaseBranch](crate::release::ReleaseBranch) from a string.
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    /// A separator with no digits in front of it, as in `"1..2"` or `".1"`.
    #[error("empty numeric component in '{text}'")]
    EmptyComponent {
        /// The text that was being parsed.
        text: String,
    },
    /// A character that is neither a digit nor a component separator.
    #[error("unexpected character {found:?} in '{text}'")]
    UnexpectedCharacter {
        /// The text that was being parsed.
        text: String,
        /// The rejected character.
        found: char,
    },
    /// Release numbers start at 1.
    #[error("zero release number in '{text}'")]
    ZeroRelease {
        /// The text that was being parsed.
        text: String,
    },
    /// More dot-separated components than the type has fields.
    #[error("too many components in '{text}'")]
    TooManyComponents {
        /// The text that was being parsed.
        text: String,
    },
    /// Identifier components are bounded by 9999.
    #[error("component '{component}' in '{text}' is too large")]
    TooLarge {
        /// The text that was being parsed.
        text: String,
        /// The digit run that exceeds the bound.
        component: String,
    },
    /// A populated component after an unspecified one, as in `"1.0.3"`.
    #[error("'{text}' populates a component after an unspecified one")]
    NonContiguous {
        /// The text that was being parsed.
        text: String,
    },
}
