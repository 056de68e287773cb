// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider Timelive project*
//!
//! This crate contains the Timelive procedural macros
//!

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{LitInt, Token, parse_macro_input};

// TODO: these are copied from timelive-core (so are not synced)
const MIN_YEAR: i64 = 1;
const MAX_YEAR: i64 = 9999;

/// The three comma separated literals of `ymd!(year, month, day)`
struct YmdArgs {
    year: LitInt,
    month: LitInt,
    day: LitInt,
}

impl Parse for YmdArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let year = input.parse()?;
        input.parse::<Token![,]>()?;
        let month = input.parse()?;
        input.parse::<Token![,]>()?;
        let day = input.parse()?;
        // Allow a trailing comma
        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }
        Ok(YmdArgs { year, month, day })
    }
}

/// Parse a literal and check it lies within `min..=max`
fn checked_value(lit: &LitInt, name: &str, min: i64, max: i64) -> Result<i64, syn::Error> {
    let value = lit
        .base10_parse::<i64>()
        .map_err(|_| syn::Error::new_spanned(lit, "Expected a valid i64 integer literal"))?;
    if value < min || value > max {
        return Err(syn::Error::new_spanned(
            lit,
            format!("{name} must be between {min} and {max}"),
        ));
    }
    Ok(value)
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i64, month: i64) -> i64 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Create a `CalendarDate`, using `ymd!(year, month, day)`, with compile time
/// checking of the values (including the number of days in the month).
///
/// `CalendarDate` must be in scope where the macro is used.
#[proc_macro]
pub fn ymd(input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(input as YmdArgs);

    let checked = checked_value(&args.year, "Year", MIN_YEAR, MAX_YEAR).and_then(|year| {
        let month = checked_value(&args.month, "Month", 1, 12)?;
        let day = checked_value(&args.day, "Day", 1, days_in_month(year, month))?;
        Ok((year as i32, month as u32, day as u32))
    });

    let (year, month, day) = match checked {
        Ok(values) => values,
        Err(error) => return error.to_compile_error().into(),
    };

    quote! {
        CalendarDate::from_ymd(#year, #month, #day).unwrap()
    }
    .into()
}
