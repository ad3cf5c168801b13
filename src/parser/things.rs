use crate::core::EnrichmentData;
use crate::error::ParseError;
use crate::parser::poll::best_at_player_counts;
use crate::parser::xml::{parse_document, XmlElement};
use crate::parser::{check_error_root, parse_f64, value_attr};

/// Parse a `thing?id=...&stats=1` response into enrichment data, one
/// entry per `<item>` that carries an id. An empty response is not an
/// error: the caller simply finds nothing to merge.
pub fn parse_things(xml: &str) -> Result<Vec<EnrichmentData>, ParseError> {
    let root = parse_document(xml)?;
    check_error_root(&root)?;

    Ok(root
        .find_all("item")
        .into_iter()
        .filter_map(enrichment_from_item)
        .collect())
}

fn enrichment_from_item(item: &XmlElement) -> Option<EnrichmentData> {
    let id = item.attr("id").or_else(|| item.attr("objectid"))?.trim();
    if id.is_empty() {
        return None;
    }

    let ratings = item.find_path(&["statistics", "ratings"]).unwrap_or(item);
    let stat = |name: &str| ratings.find(name).and_then(value_attr).and_then(parse_f64);

    Some(EnrichmentData {
        id: id.to_string(),
        complexity_weight: stat("averageweight"),
        community_rating: stat("average"),
        best_at_player_counts: best_at_player_counts(item),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const THINGS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<items termsofuse="https://boardgamegeek.com/xmlapi/termsofuse">
    <item type="boardgame" id="174430">
        <name type="primary" sortindex="1" value="Gloomhaven"/>
        <poll name="suggested_numplayers" title="User Suggested Number of Players" totalvotes="1000">
            <results numplayers="1">
                <result value="Best" numvotes="100"/>
                <result value="Recommended" numvotes="400"/>
                <result value="Not Recommended" numvotes="50"/>
            </results>
            <results numplayers="3">
                <result value="Best" numvotes="600"/>
                <result value="Recommended" numvotes="200"/>
                <result value="Not Recommended" numvotes="10"/>
            </results>
        </poll>
        <statistics page="1">
            <ratings>
                <usersrated value="60000"/>
                <average value="8.58"/>
                <bayesaverage value="8.37"/>
                <averageweight value="3.91"/>
            </ratings>
        </statistics>
    </item>
    <item type="boardgame" id="5">
        <statistics page="1">
            <ratings>
                <average value="0"/>
                <averageweight value="0"/>
            </ratings>
        </statistics>
    </item>
    <item type="boardgame">
        <statistics page="1"><ratings><average value="9"/></ratings></statistics>
    </item>
</items>"#;

    #[test]
    fn test_parse_things() {
        let data = parse_things(THINGS).unwrap();
        assert_eq!(data.len(), 2);

        let gloomhaven = &data[0];
        assert_eq!(gloomhaven.id, "174430");
        assert_eq!(gloomhaven.complexity_weight, Some(3.91));
        assert_eq!(gloomhaven.community_rating, Some(8.58));
        let best = gloomhaven.best_at_player_counts.clone().unwrap();
        assert_eq!(best.into_iter().collect::<Vec<_>>(), vec![3]);

        let bare = &data[1];
        assert_eq!(bare.complexity_weight, Some(0.0));
        assert_eq!(bare.best_at_player_counts, None);
    }

    #[test]
    fn test_empty_and_error_responses() {
        assert_eq!(parse_things("<items/>").unwrap(), vec![]);
        assert_eq!(
            parse_things("<message>Please try again later</message>"),
            Err(ParseError::ApiError("Please try again later".to_string()))
        );
        assert!(parse_things("<items>").is_err());
    }
}
