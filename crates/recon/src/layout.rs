//! Default report layout: committee levels and the role rows under each.
//!
//! Order is significant. Table 1 lists `COMMITTEE_ORDER` top to bottom and
//! Table 2 lists `ROLE_ORDER` top to bottom. Role sets differ per level and
//! are not sorted; Village, for instance, lists Secretary before
//! Vice-President.

pub const COMMITTEE_ORDER: [&str; 10] = [
    "Cluster",
    "Unit",
    "Booth",
    "Mandal",
    "Village",
    "Town",
    "Ward",
    "Division",
    "Parliament",
    "Assembly",
];

pub const ROLE_ORDER: [(&str, &str); 53] = [
    ("Cluster", "Convenor"),
    ("Cluster", "Co-Convenor"),

    ("Unit", "Convenor"),
    ("Unit", "Co-Convenor"),

    ("Booth", "Convenor"),
    ("Booth", "Co-Convenor"),

    ("Mandal", "President"),
    ("Mandal", "Vice-President"),
    ("Mandal", "General Secretary"),
    ("Mandal", "Organizing Secretary"),
    ("Mandal", "Secretary"),
    ("Mandal", "Treasurer"),

    ("Village", "President"),
    ("Village", "General Secretary"),
    ("Village", "Secretary"),
    ("Village", "Vice-President"),
    ("Village", "Organizing Secretary"),
    ("Village", "Treasurer"),

    ("Town", "President"),
    ("Town", "Vice-President"),
    ("Town", "General Secretary"),
    ("Town", "Organizing Secretary"),
    ("Town", "Secretary"),
    ("Town", "Treasurer"),

    ("Ward", "President"),
    ("Ward", "Vice-President"),
    ("Ward", "General Secretary"),
    ("Ward", "Organizing Secretary"),
    ("Ward", "Secretary"),
    ("Ward", "Treasurer"),

    ("Division", "President"),
    ("Division", "Vice-President"),
    ("Division", "General Secretary"),
    ("Division", "Organizing Secretary"),
    ("Division", "Secretary"),
    ("Division", "Treasurer"),

    ("Parliament", "President"),
    ("Parliament", "Vice-President"),
    ("Parliament", "General Secretary"),
    ("Parliament", "Organizing Secretary"),
    ("Parliament", "Secretary"),
    ("Parliament", "Official Spokesperson"),
    ("Parliament", "Treasurer"),
    ("Parliament", "Office Secretary"),
    ("Parliament", "Media Coordinator"),
    ("Parliament", "Social Media Coordinator"),

    ("Assembly", "President"),
    ("Assembly", "Vice-President"),
    ("Assembly", "General Secretary"),
    ("Assembly", "Organizing Secretary"),
    ("Assembly", "Secretary"),
    ("Assembly", "Official Spokesperson"),
    ("Assembly", "Social Media Coordinator"),
];
