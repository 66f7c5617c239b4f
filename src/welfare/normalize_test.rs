//! Tests for text/array normalization and the per-registry field tables.

use serde_json::{Value, json};

use super::models::{Source, WelfareAttachment};
use super::normalize::*;
use super::xml;

#[test]
fn test_normalize_text_collapses_whitespace() {
    let cases = [
        ("  청년\t월세\n\n지원  ", Some("청년 월세 지원")),
        ("single", Some("single")),
        ("a \r\n b    c", Some("a b c")),
        ("", None),
        (" \t\n ", None),
    ];
    for (raw, expected) in cases {
        assert_eq!(
            normalize_text(Some(&json!(raw))).as_deref(),
            expected,
            "input {raw:?}"
        );
    }
}

#[test]
fn test_normalize_text_non_string_inputs() {
    assert_eq!(normalize_text(None), None);
    assert_eq!(normalize_text(Some(&Value::Null)), None);
    assert_eq!(normalize_text(Some(&json!(false))), None);
    assert_eq!(normalize_text(Some(&json!(["a", "b"]))), None);
    assert_eq!(normalize_text(Some(&json!(42))).as_deref(), Some("42"));
    assert_eq!(
        normalize_text(Some(&json!({ "@_lang": "ko", "#text": "  보건  복지부 " }))).as_deref(),
        Some("보건 복지부")
    );
    assert_eq!(normalize_text(Some(&json!({ "@_lang": "ko" }))), None);
}

#[test]
fn test_normalize_array_cardinalities() {
    let object = json!({ "servSeDetailNm": "신청서" });
    let array = json!([{ "n": 1 }, { "n": 2 }]);

    assert!(normalize_array(None).is_empty());
    assert!(normalize_array(Some(&Value::Null)).is_empty());
    assert!(normalize_array(Some(&json!(""))).is_empty());
    assert_eq!(normalize_array(Some(&object)), vec![&object]);
    assert_eq!(
        normalize_array(Some(&array)),
        vec![&json!({ "n": 1 }), &json!({ "n": 2 })]
    );
    assert_eq!(normalize_array(Some(&json!("scalar"))), vec![&json!("scalar")]);
}

#[test]
fn test_map_national_list_item() {
    let node = json!({
        "servId": "  WLF00001188 ",
        "servNm": "청년 월세\n 한시 특별지원",
        "jurMnofNm": "국토교통부",
        "jurOrgNm": "주거복지정책과",
        "servDgst": "청년의   월세 부담 완화",
        "srvPvsnNm": "현금지급",
        "trgterIndvdlArray": "청년",
        "sprtCycNm": "월",
        "rprsCtadr": "1599-0001",
        "servDtlLink": "https://www.bokjiro.go.kr/ssis-tbu/twataa/wlfareInfo/moveTWAT52011M.do?wlfareInfoId=WLF00001188",
        "aplyMtdNm": "ignored for national",
    });

    let item = map_national_list_item(&node);

    assert_eq!(item.serv_id, "WLF00001188");
    assert_eq!(item.serv_nm.as_deref(), Some("청년 월세 한시 특별지원"));
    assert_eq!(item.agency.as_deref(), Some("국토교통부"));
    assert_eq!(item.jurisdiction.as_deref(), Some("주거복지정책과"));
    assert_eq!(item.summary.as_deref(), Some("청년의 월세 부담 완화"));
    assert_eq!(item.support.as_deref(), Some("현금지급"));
    assert_eq!(item.target.as_deref(), Some("청년"));
    assert_eq!(item.cycle.as_deref(), Some("월"));
    assert_eq!(item.contact.as_deref(), Some("1599-0001"));
    assert!(item.detail_url.as_deref().unwrap().ends_with("WLF00001188"));
    assert_eq!(item.conditions, None);
    assert_eq!(item.apply, None);
}

#[test]
fn test_map_local_list_item_joins_jurisdiction() {
    let node = json!({
        "servId": "LCG00000123",
        "servNm": "송파구 청년 주거비 지원",
        "bizChrDeptNm": "청년정책과",
        "ctpvNm": "서울특별시",
        "sggNm": "송파구",
        "aplyMtdNm": "방문",
        "trgterIndvdlNmArray": "청년",
        "rprsCtadr": "ignored for local",
        "jurMnofNm": "ignored for local",
    });

    let item = map_local_list_item(&node);

    assert_eq!(item.agency.as_deref(), Some("청년정책과"));
    assert_eq!(item.jurisdiction.as_deref(), Some("서울특별시 송파구"));
    assert_eq!(item.apply.as_deref(), Some("방문"));
    assert_eq!(item.target.as_deref(), Some("청년"));
    assert_eq!(item.contact, None);
    assert_eq!(item.conditions, None);

    let province_only = map_local_list_item(&json!({ "servId": "L2", "ctpvNm": "부산광역시", "sggNm": "" }));
    assert_eq!(province_only.jurisdiction.as_deref(), Some("부산광역시"));

    let neither = map_local_list_item(&json!({ "servId": "L3" }));
    assert_eq!(neither.jurisdiction, None);
}

#[test]
fn test_missing_service_id_maps_to_empty() {
    assert_eq!(map_national_list_item(&json!({ "servNm": "x" })).serv_id, "");
    assert_eq!(map_local_list_item(&json!({ "servId": "   " })).serv_id, "");
    assert_eq!(map_local_list_item(&json!({ "servId": 1042 })).serv_id, "1042");
}

#[test]
fn test_map_national_detail_with_fallbacks_and_attachments() {
    let tree = xml::parse(
        "<wantedDtl>\
           <servId>WLF00000024</servId><servNm>긴급복지 생계지원</servNm>\
           <jurMnofNm>보건복지부</jurMnofNm><jurOrgNm>기초생활보장과</jurOrgNm>\
           <wlfareInfoOutlCn>위기상황에 처한 가구에 생계비 지원</wlfareInfoOutlCn>\
           <alwServCn></alwServCn><srvPvsnNm>현금지급</srvPvsnNm>\
           <slctCritCn>중위소득 75% 이하</slctCritCn><aplyMtdCn>읍면동 방문</aplyMtdCn>\
           <rprsCtadr>129</rprsCtadr>\
           <basfrmList><servSeDetailNm>신청서.hwp</servSeDetailNm><servSeDetailLink>https://a/form.hwp</servSeDetailLink></basfrmList>\
           <basfrmList><servSeDetailNm>동의서.pdf</servSeDetailNm><servSeDetailLink></servSeDetailLink></basfrmList>\
           <inqplHmpgReldList><servSeDetailNm>복지로</servSeDetailNm><servSeDetailLink>www.bokjiro.go.kr</servSeDetailLink></inqplHmpgReldList>\
         </wantedDtl>",
    )
    .unwrap();

    let detail = map_national_detail(&tree["wantedDtl"]);

    assert_eq!(detail.serv_id, "WLF00000024");
    assert_eq!(detail.summary.as_deref(), Some("위기상황에 처한 가구에 생계비 지원"));
    assert_eq!(detail.support.as_deref(), Some("현금지급"), "falls back to srvPvsnNm");
    assert_eq!(detail.conditions.as_deref(), Some("중위소득 75% 이하"));
    assert_eq!(detail.apply.as_deref(), Some("읍면동 방문"));
    assert_eq!(detail.contact.as_deref(), Some("129"));
    assert_eq!(
        detail.attachments,
        vec![
            WelfareAttachment {
                name: "신청서.hwp".to_string(),
                url: "https://a/form.hwp".to_string(),
            },
            WelfareAttachment {
                name: "복지로".to_string(),
                url: "www.bokjiro.go.kr".to_string(),
            },
        ]
    );
}

#[test]
fn test_map_local_detail_filters_non_http_contacts() {
    let node = json!({
        "servId": "LCG00000777",
        "bizChrDeptNm": "복지정책과",
        "ctpvNm": "경기도",
        "sggNm": "수원시",
        "servDgst": "출산 가정 지원",
        "alwServCn": "첫째 50만원",
        "sprtTrgtCn": "관내 출산 가정",
        "aplyMtdNm": "방문 신청",
        "basfrmList": { "wlfareInfoReldNm": "신청서", "wlfareInfoReldCn": "신청서.hwp" },
        "inqplCtadrList": [
            { "wlfareInfoReldNm": "복지정책과", "wlfareInfoReldCn": "031-000-0000" },
            { "wlfareInfoReldNm": "홈페이지", "wlfareInfoReldCn": "https://www.suwon.go.kr" },
        ],
    });

    let detail = map_local_detail(&node);

    assert_eq!(detail.jurisdiction.as_deref(), Some("경기도 수원시"));
    assert_eq!(detail.support.as_deref(), Some("첫째 50만원"));
    assert_eq!(detail.conditions.as_deref(), Some("관내 출산 가정"), "falls back to sprtTrgtCn");
    assert_eq!(detail.apply.as_deref(), Some("방문 신청"), "falls back to aplyMtdNm");
    assert_eq!(detail.contact, None);
    assert_eq!(
        detail
            .attachments
            .iter()
            .map(|a| (a.name.as_str(), a.url.as_str()))
            .collect::<Vec<_>>(),
        vec![("신청서", "신청서.hwp"), ("홈페이지", "https://www.suwon.go.kr")]
    );
}

#[test]
fn test_primary_tag_wins_over_fallback() {
    let detail = map_local_detail(&json!({
        "servId": "L9",
        "slctCritCn": "만 19~39세",
        "sprtTrgtCn": "다른 값",
        "aplyMtdCn": "온라인",
        "aplyMtdNm": "방문",
    }));
    assert_eq!(detail.conditions.as_deref(), Some("만 19~39세"));
    assert_eq!(detail.apply.as_deref(), Some("온라인"));
}

#[test]
fn test_conditions_absent_from_every_list_table() {
    for source in Source::ALL {
        assert!(matches!(source.schema().list.conditions, FieldRule::Absent));
        assert!(matches!(source.schema().detail.detail_url, FieldRule::Absent));
    }
}

#[test]
fn test_source_dispatch_matches_named_mappers() {
    let node = json!({ "servId": "X1", "jurMnofNm": "국", "bizChrDeptNm": "지" });
    assert_eq!(map_list_item_for(Source::National, &node), map_national_list_item(&node));
    assert_eq!(map_list_item_for(Source::Local, &node), map_local_list_item(&node));
    assert_eq!(map_detail_for(Source::National, &node), map_national_detail(&node));
    assert_eq!(map_detail_for(Source::Local, &node), map_local_detail(&node));
}
