use super::*;

fn comment_item(cid: &str, user: &str, stars: &str, votes: &str, time: &str, text: &str) -> String {
    format!(
        r#"<div class="comment-item " data-cid="{cid}">
    <div class="avatar"><a title="{user}" href="https://www.douban.com/people/u{cid}/"><img src="a.jpg"></a></div>
    <div class="comment">
        <h3>
            <span class="comment-vote"><span class="votes vote-count">{votes}</span></span>
            <span class="comment-info">
                <a href="https://www.douban.com/people/u{cid}/" class="">{user}</a>
                <span>看过</span>
                <span class="allstar{stars} rating" title="力荐"></span>
                <span class="comment-time " title="{time}">{date}</span>
            </span>
        </h3>
        <p class=" comment-content"><span class="short">{text}</span></p>
    </div>
</div>"#,
        date = time.split(' ').next().unwrap_or(""),
    )
}

fn page(items: &[String]) -> String {
    format!(
        r#"<html><head><meta charset="utf-8"><title>短评</title></head>
<body><div id="comments" class="mod-bd">{}</div></body></html>"#,
        items.join("\n")
    )
}

fn first_item(html: &str) -> Result<CommentRecord, ExtractionError> {
    let document = Html::parse_document(html);
    let item = document.select(&COMMENT_ITEM).next().unwrap();
    extract_comment(0, 0, item)
}

#[test]
fn test_extract_full_item() {
    let html = page(&[comment_item(
        "2871234567",
        "影迷小王",
        "50",
        "1203",
        "2024-01-05 21:13:02",
        "  节奏很好，结尾有点仓促。 ",
    )]);

    let record = first_item(&html).unwrap();
    assert_eq!(record.comment_id, "2871234567");
    assert_eq!(record.username, "影迷小王");
    assert_eq!(record.rating.map(|r| r.stars()), Some(5));
    assert_eq!(record.content, "节奏很好，结尾有点仓促。");
    assert_eq!(record.votes, 1203);
    assert_eq!(record.time, "2024-01-05 21:13:02");
}

#[test]
fn test_rating_uses_integer_division() {
    assert_eq!(rating_from_classes("allstar50 rating").map(|r| r.stars()), Some(5));
    assert_eq!(rating_from_classes("allstar15 rating").map(|r| r.stars()), Some(1));
    assert_eq!(rating_from_classes("rating allstar30").map(|r| r.stars()), Some(3));
}

#[test]
fn test_rating_absent_without_allstar_token() {
    assert_eq!(rating_from_classes("rating"), None);
    assert_eq!(rating_from_classes(""), None);
    assert_eq!(rating_from_classes("allstar rating"), None);
    assert_eq!(rating_from_classes("allstarXX rating"), None);
}

#[test]
fn test_rating_takes_first_numeric_token() {
    assert_eq!(
        rating_from_classes("allstarbig allstar20 allstar40").map(|r| r.stars()),
        Some(2)
    );
}

#[test]
fn test_item_without_rating_element() {
    let html = page(&[r#"<div class="comment-item" data-cid="9">
        <div class="comment">
            <span class="comment-info"><a href="/people/x/">路人甲</a><span>看过</span></span>
            <span class="short">还没想好打几分</span>
        </div>
    </div>"#
        .to_string()]);

    let record = first_item(&html).unwrap();
    assert_eq!(record.username, "路人甲");
    assert_eq!(record.rating, None);
    assert_eq!(record.votes, 0);
    assert_eq!(record.time, "");
}

#[test]
fn test_missing_vote_count_defaults_to_zero() {
    let html = page(&[r#"<div class="comment-item" data-cid="10">
        <div class="comment">
            <span class="comment-info"><a href="/people/y/">someone</a></span>
            <span class="short">ok</span>
        </div>
    </div>"#
        .to_string()]);

    assert_eq!(first_item(&html).unwrap().votes, 0);
}

#[test]
fn test_unparsable_vote_count_defaults_to_zero() {
    let html = page(&[comment_item("11", "someone", "40", "1.2万", "2024-02-01 10:00:00", "ok")]);
    assert_eq!(first_item(&html).unwrap().votes, 0);
}

#[test]
fn test_missing_user_link_is_anonymous() {
    let html = page(&[r#"<div class="comment-item" data-cid="12">
        <div class="comment">
            <span class="comment-info"><span>看过</span></span>
            <span class="short">no link here</span>
        </div>
    </div>"#
        .to_string()]);

    assert_eq!(first_item(&html).unwrap().username, "anonymous");
}

#[test]
fn test_missing_info_element_is_anonymous() {
    let html = page(&[r#"<div class="comment-item" data-cid="13">
        <div class="comment"><span class="short">bare</span></div>
    </div>"#
        .to_string()]);

    let record = first_item(&html).unwrap();
    assert_eq!(record.username, ANONYMOUS_USERNAME);
    assert_eq!(record.content, "bare");
}

#[test]
fn test_missing_id_and_content_default_to_empty() {
    let html = page(&[r#"<div class="comment-item"><div class="comment"></div></div>"#.to_string()]);

    let record = first_item(&html).unwrap();
    assert_eq!(record.comment_id, "");
    assert_eq!(record.content, "");
    assert_eq!(record.time, "");
}

#[test]
fn test_malformed_item_is_skipped_not_fatal() {
    let html = page(&[
        comment_item("1", "alice", "40", "3", "2024-01-01 08:00:00", "first"),
        r#"<div class="comment-item" data-cid="2"><div class="avatar"></div></div>"#.to_string(),
        comment_item("3", "bob", "20", "1", "2024-01-02 09:00:00", "third"),
    ]);

    let outcome = parse_page(4, &html);
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0].comment_id, "1");
    assert_eq!(outcome.records[1].comment_id, "3");
    assert_eq!(
        outcome.failures,
        vec![ExtractionError::MissingSubtree { page: 4, index: 1, element: "div.comment" }]
    );
    assert_eq!(
        outcome.failures[0].to_string(),
        "page 4 comment item 1 has no div.comment element"
    );
}

#[test]
fn test_page_preserves_item_order_and_duplicates() {
    let html = page(&[
        comment_item("5", "a", "10", "0", "2024-01-01 00:00:00", "x"),
        comment_item("4", "b", "30", "0", "2024-01-01 00:00:00", "y"),
        comment_item("5", "a", "10", "0", "2024-01-01 00:00:00", "x"),
    ]);

    let ids: Vec<String> = parse_page(0, &html).records.into_iter().map(|r| r.comment_id).collect();
    assert_eq!(ids, vec!["5", "4", "5"]);
}

#[test]
fn test_page_without_items() {
    let outcome = parse_page(0, "<html><body><p>没有短评</p></body></html>");
    assert!(outcome.records.is_empty());
    assert!(outcome.failures.is_empty());
}
