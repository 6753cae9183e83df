use chrono::Duration;
use course_core::model::ModuleId;
use course_core::time::fixed_now;

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_enrolled_at};

#[tokio::test(flavor = "current_thread")]
async fn auth_view_smoke_renders_login_form() {
    let mut harness = setup_view_harness(ViewKind::Auth { reset: false }).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Área de Membros"), "missing title in {html}");
    assert!(html.contains("Entrar"), "missing submit in {html}");
    assert!(html.contains("Esqueci minha senha"), "missing reset link in {html}");
    assert!(!html.contains("Senha redefinida?"), "unexpected banner in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn auth_view_smoke_shows_reset_banner() {
    let mut harness = setup_view_harness(ViewKind::Auth { reset: true }).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Senha redefinida?"), "missing banner in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_fresh_progress() {
    let mut harness = setup_view_harness(ViewKind::Dashboard).await;
    harness
        .services
        .auth_gate()
        .login("bia@example.com", "segredo")
        .await
        .expect("login");

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("0% concluído"), "missing percentage in {html}");
    assert!(html.contains("0/4"), "missing badge in {html}");
    assert!(html.contains("Bem-vindo(a), bia!"), "missing greeting in {html}");
    assert!(html.contains("Bloqueado por 7 dias"), "missing lock label in {html}");
    assert!(!html.contains("Completo"), "unexpected completed badge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_reflects_completed_modules() {
    let mut harness = setup_view_harness(ViewKind::Dashboard).await;
    let progress = harness.services.progress();
    progress.mark_complete(ModuleId::new(1)).await.expect("mark 1");
    progress.mark_complete(ModuleId::new(2)).await.expect("mark 2");

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("50% concluído"), "missing percentage in {html}");
    assert!(html.contains("2/4"), "missing badge in {html}");
    assert!(html.contains("Completo"), "missing completed badge in {html}");
    assert!(html.contains("Revisar"), "missing review cta in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_unlocks_bonus_after_a_week() {
    let mut harness =
        setup_view_harness_enrolled_at(ViewKind::Dashboard, fixed_now() - Duration::days(10)).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Disponível"), "missing unlocked badge in {html}");
    assert!(html.contains("Acessar Bônus"), "missing bonus cta in {html}");
    assert!(!html.contains("Bloqueado por"), "unexpected lock in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn module_view_smoke_lists_materials() {
    let mut harness = setup_view_harness(ViewKind::Module(1)).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("5 aulas disponíveis"), "missing count in {html}");
    assert!(html.contains("Guia de Precificação e Lucro"), "missing material in {html}");
    assert!(html.contains("Visualizar"), "missing view action in {html}");
    assert!(html.contains("Download"), "missing download action in {html}");
    assert!(html.contains("Concluir"), "missing complete action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn module_view_smoke_marks_completed_module() {
    let mut harness = setup_view_harness(ViewKind::Module(3)).await;
    harness
        .services
        .progress()
        .mark_complete(ModuleId::new(3))
        .await
        .expect("mark 3");

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("✔ Completo"), "missing completed mark in {html}");
    assert!(!html.contains("Concluir"), "unexpected complete action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn module_view_smoke_locks_bonus_for_new_members() {
    let mut harness = setup_view_harness(ViewKind::Module(5)).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Bloqueado por 7 dias"), "missing lock in {html}");
    assert!(!html.contains("Visualizar"), "bonus materials leaked in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn module_view_smoke_opens_bonus_after_a_week() {
    let mut harness =
        setup_view_harness_enrolled_at(ViewKind::Module(5), fixed_now() - Duration::days(7)).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("materiais bônus"), "missing bonus count in {html}");
    assert!(html.contains("Visualizar"), "missing materials in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn module_view_smoke_reports_unknown_module() {
    let mut harness = setup_view_harness(ViewKind::Module(42)).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Módulo não encontrado"), "missing notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn not_found_view_smoke_renders_404() {
    let mut harness =
        setup_view_harness(ViewKind::NotFound(vec!["nada".into(), "aqui".into()])).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("404"), "missing code in {html}");
    assert!(html.contains("Voltar ao início"), "missing home link in {html}");
}
