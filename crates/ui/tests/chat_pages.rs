mod common;

use api_client::TokenStore;
use common::{Event, RecordingSurface, context};
use ui::{ChatMessage, ConsultPage, EMPTY_INSTRUCTION, Page, StrategyPage};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_check_auth(server: &MockServer, body: serde_json::Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/check-auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn consult_answers_question() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/knowledge"))
        .and(body_json(json!({"question": "什么是市盈率？"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "code": 200,
            "message": "市盈率是股价与每股收益的比值。"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, _tokens) = context(&server, Some("jwt-token"));
    let page = ConsultPage::new(ctx);
    let mut surface = RecordingSurface::default();

    page.send_message(&mut surface, "  什么是市盈率？ ").await;

    assert_eq!(
        surface.events,
        vec![
            Event::Message(ChatMessage::user("什么是市盈率？")),
            Event::Pending("正在为您解答，请稍候...".to_string()),
            Event::PendingCleared,
            Event::Message(ChatMessage::assistant("市盈率是股价与每股收益的比值。")),
        ]
    );
}

#[tokio::test]
async fn consult_failure_is_shown_inline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/knowledge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "code": 500,
            "message": "服务器内部错误，请稍后重试"
        })))
        .mount(&server)
        .await;

    let (ctx, _tokens) = context(&server, Some("jwt-token"));
    let page = ConsultPage::new(ctx);
    let mut surface = RecordingSurface::default();

    page.send_message(&mut surface, "什么是市盈率？").await;

    let last = surface.messages().pop().cloned().unwrap();
    assert_eq!(last, ChatMessage::assistant_error("咨询失败：服务器内部错误，请稍后重试"));
    assert!(surface.pending_is_clear());
}

#[tokio::test]
async fn consult_ignores_blank_input() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/knowledge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    let (ctx, _tokens) = context(&server, Some("jwt-token"));
    let page = ConsultPage::new(ctx);
    let mut surface = RecordingSurface::default();

    page.send_message(&mut surface, "   ").await;

    assert!(surface.events.is_empty());
}

#[tokio::test]
async fn consult_open_with_rejected_token_deletes_it_and_redirects() {
    let server = MockServer::start().await;
    mount_check_auth(&server, json!({"success": false, "message": "Token 已过期"}), 1).await;

    let (ctx, tokens) = context(&server, Some("expired"));
    let page = ConsultPage::new(ctx);
    let mut surface = RecordingSurface::default();

    assert!(!page.open(&mut surface).await);
    assert_eq!(tokens.load().unwrap(), None);
    assert_eq!(surface.alerts(), vec!["登录状态异常，请重新登录"]);
    assert_eq!(surface.navigations(), vec![Page::Login]);
}

#[tokio::test]
async fn strategy_empty_instruction_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/strategy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    let (ctx, _tokens) = context(&server, Some("jwt-token"));
    let page = StrategyPage::new(ctx);
    let mut surface = RecordingSurface::default();

    page.generate(&mut surface, "  ").await;

    assert_eq!(surface.events, vec![Event::ValidationError(EMPTY_INSTRUCTION.to_string())]);
    assert_eq!(EMPTY_INSTRUCTION, "请输入投资需求");
}

#[tokio::test]
async fn strategy_renders_first_plan() {
    let server = MockServer::start().await;
    mount_check_auth(&server, json!({"success": true, "user_id": "u-1"}), 1).await;
    Mock::given(method("POST"))
        .and(path("/strategy"))
        .and(body_json(json!({"instruction": "稳健增值，持有一年"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{
                "title": "稳健增值组合",
                "description": "以高股息蓝筹为主",
                "riskLevel": "中低",
                "annualReturn": "6%-9%",
                "recommendedStocks": [
                    {"name": "长江电力", "code": "600900"},
                    {"name": "中国神华", "code": "601088"}
                ]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, _tokens) = context(&server, Some("jwt-token"));
    let page = StrategyPage::new(ctx);
    let mut surface = RecordingSurface::default();

    assert!(page.open(&mut surface).await);
    page.generate(&mut surface, "稳健增值，持有一年").await;

    let messages = surface.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(*messages[0], ChatMessage::user("稳健增值，持有一年"));
    assert_eq!(
        *messages[1],
        ChatMessage::assistant(
            "稳健增值组合\n以高股息蓝筹为主\n风险等级：中低 | 历史年化收益：6%-9%\n推荐股票：长江电力(600900)、中国神华(601088)"
        )
    );
    assert!(surface.pending_is_clear());
}

#[tokio::test]
async fn strategy_renders_plan_with_numeric_stock_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/strategy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{
                "title": "银行股轮动",
                "description": null,
                "riskLevel": 2,
                "annualReturn": 0.08,
                "recommendedStocks": [{"name": "浦发银行", "code": 600000}]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, _tokens) = context(&server, Some("jwt-token"));
    let page = StrategyPage::new(ctx);
    let mut surface = RecordingSurface::default();

    page.generate(&mut surface, "银行股").await;

    let last = surface.messages().pop().cloned().unwrap();
    assert_eq!(
        last,
        ChatMessage::assistant(
            "银行股轮动\n未获取到策略描述\n风险等级：2 | 历史年化收益：0.08\n推荐股票：浦发银行(600000)"
        )
    );
}

#[tokio::test]
async fn strategy_failure_lists_suggestions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/strategy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "无法识别投资需求",
            "suggestions": ["请说明投资金额", "请说明风险偏好"]
        })))
        .mount(&server)
        .await;

    let (ctx, _tokens) = context(&server, Some("jwt-token"));
    let page = StrategyPage::new(ctx);
    let mut surface = RecordingSurface::default();

    page.generate(&mut surface, "随便").await;

    let last = surface.messages().pop().cloned().unwrap();
    assert_eq!(
        last,
        ChatMessage::assistant_error("无法识别投资需求\n建议：请说明投资金额 请说明风险偏好")
    );
}

#[tokio::test]
async fn strategy_success_without_plan_is_an_inline_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/strategy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})))
        .mount(&server)
        .await;

    let (ctx, _tokens) = context(&server, Some("jwt-token"));
    let page = StrategyPage::new(ctx);
    let mut surface = RecordingSurface::default();

    page.generate(&mut surface, "高风险高收益").await;

    let last = surface.messages().pop().cloned().unwrap();
    assert_eq!(last, ChatMessage::assistant_error("策略生成失败：未获取到策略数据"));
    assert!(surface.pending_is_clear());
}

#[tokio::test]
async fn strategy_open_without_token_makes_no_call() {
    let server = MockServer::start().await;
    mount_check_auth(&server, json!({"success": true}), 0).await;

    let (ctx, _tokens) = context(&server, None);
    let page = StrategyPage::new(ctx);
    let mut surface = RecordingSurface::default();

    assert!(!page.open(&mut surface).await);
    assert_eq!(surface.events, vec![Event::Navigate(Page::Login)]);
}
