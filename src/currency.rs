/// Display formatting for money amounts
///
/// An immutable value handed to the presentation layer; there is no
/// process-wide formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub code: String,
    pub symbol: String,
    pub fraction_digits: u8,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            code: "GBP".to_string(),
            symbol: "£".to_string(),
            fraction_digits: 2,
        }
    }
}

impl CurrencyFormat {
    pub fn new(code: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn with_fraction_digits(mut self, fraction_digits: u8) -> Self {
        // 10^18 still fits comfortably in u128 alongside the whole part
        self.fraction_digits = fraction_digits.min(18);
        self
    }

    /// Format an amount as `£1,234.50` / `-£5.00`
    ///
    /// Rounds half away from zero to `fraction_digits` places.
    pub fn format(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return format!("{}{}", self.symbol, amount);
        }

        let digits = u32::from(self.fraction_digits);
        let scale = 10u128.pow(digits);
        let scaled = (amount.abs() * scale as f64).round();

        // Past u128 the cast would saturate, so print the float as is
        if scaled >= u128::MAX as f64 {
            let sign = if amount < 0.0 { "-" } else { "" };
            return format!("{sign}{}{}", self.symbol, amount.abs());
        }
        let scaled = scaled as u128;
        let whole = scaled / scale;
        let fraction = scaled % scale;

        // A value that rounds to zero shouldn't print as "-£0.00"
        let sign = if amount < 0.0 && scaled != 0 { "-" } else { "" };

        let mut out = format!("{sign}{}{}", self.symbol, group_thousands(whole));
        if digits > 0 {
            out.push_str(&format!(".{:0width$}", fraction, width = digits as usize));
        }
        out
    }
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
