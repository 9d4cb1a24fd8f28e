//! Ordered keyword table mapping descriptions to spending categories.
//!
//! Matching is first-hit: categories are checked in declaration order, keywords in list
//! order, and the first keyword found (case-insensitive substring) wins. Order is the only
//! precedence rule, so the table is a `Vec` and never a map.

use serde::{Deserialize, Serialize};

/// One category and the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTable {
    /// Returned when no keyword matches.
    pub default_category: String,
    #[serde(rename = "category")]
    pub rules: Vec<CategoryRule>,
}

impl CategoryTable {
    pub fn new(default_category: impl Into<String>, rules: Vec<CategoryRule>) -> Self {
        Self {
            default_category: default_category.into(),
            rules,
        }
    }

    /// Classify a normalized description.
    pub fn classify(&self, description: &str) -> &str {
        let desc = description.to_lowercase();
        for rule in &self.rules {
            for keyword in &rule.keywords {
                if desc.contains(&keyword.to_lowercase()) {
                    return &rule.name;
                }
            }
        }
        &self.default_category
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }
}

impl Default for CategoryTable {
    /// Household table used when no config file overrides it.
    ///
    /// `Medical` carries an empty keyword, so it captures everything the earlier
    /// categories did not claim and the categories after it are unreachable.
    fn default() -> Self {
        Self::new(
            "General",
            vec![
                CategoryRule::new(
                    "Credit Cards",
                    ["Visa", "MasterCard", "AMEX", "Zelle", "Capital One"],
                ),
                CategoryRule::new(
                    "Bills",
                    [
                        "Audi Fincl",
                        "Dept Education",
                        "Zip.Co",
                        "Verizon",
                        "TMobile",
                        "T-Mobile",
                        "T Mobile",
                        "Tmobile",
                    ],
                ),
                CategoryRule::new(
                    "Food",
                    [
                        "Restaurant",
                        "Grocery",
                        "Cafe",
                        "Sonic Drive",
                        "Market River Falls",
                        "Mission Bbq",
                        "Chick-Fil-A",
                        "McDonald's",
                        "Roma Pizza",
                        "Starbucks",
                        "DD/Br",
                        "Pizza Bono",
                        "Benny Vitalis",
                        "Jeresy Mikes",
                        "Firehouse",
                        "Wendys",
                        "Wendy's",
                        "Sonic",
                    ],
                ),
                CategoryRule::new("Fuel", ["Murphy Express", "Sheetz", "Wawa", "Shell"]),
                CategoryRule::new(
                    "Utilities",
                    ["Electric", "Water", "Internet", "Starlink", "All Point Broadband"],
                ),
                CategoryRule::new(
                    "General",
                    [
                        "Best Buy",
                        "7-Eleven",
                        "Tobaccohut",
                        "Microsoft",
                        "Wal-Mart",
                        "Ace Hardware",
                        "Walmart",
                        "Fas Mart",
                        "Tobacco Hut",
                        "Amzn Mktp Us",
                        "Steam",
                        "The Ups Store",
                        "Ace Hardware",
                    ],
                ),
                CategoryRule::new(
                    "Maintenance/Parts",
                    [
                        "Fcp Euro",
                        "Rock Auto",
                        "Advance Auto Parts",
                        "bimmergeek",
                        "Kohl's",
                        "Lowe's",
                        "Car Wash",
                        "Rnr Tire Express",
                        "Tire Rack",
                    ],
                ),
                CategoryRule::new("Medical", [""]),
                CategoryRule::new(
                    "Subscriptions",
                    ["Plexincpass", "Prime Video", "Hidive", "Crunchyroll", "Netflix.Com"],
                ),
                CategoryRule::new("Income", ["Deposit"]),
                CategoryRule::new("Savings", ["Transfered To Shares"]),
            ],
        )
    }
}
