/// Splits the `data` request parameter into field names.
///
/// `data=users.name,weight_classes` becomes `["users.name", "weight_classes"]`.
/// Pieces are not trimmed, so `"id, users.name"` yields `" users.name"`, which
/// the builder then rejects. An absent or empty parameter means "default
/// projection".
pub fn parse_data_param(data: Option<&str>) -> Option<Vec<String>> {
    data.filter(|data| !data.is_empty())
        .map(|data| data.split(',').map(str::to_string).collect())
}
