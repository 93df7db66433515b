use parse_questions::extractor::{Backend, PatternExtractor, QuestionExtractor};
use parse_questions::models::HeaderLabels;
use parse_questions::output::OutputFormat;
use parse_questions::{App, Config, QuestionRecord, RunOutcome};
use std::fs;
use std::path::Path;

/// 当前构建可用的所有解析后端
fn extractors() -> Vec<Box<dyn QuestionExtractor>> {
    let mut list: Vec<Box<dyn QuestionExtractor>> =
        vec![Box::new(PatternExtractor::new(HeaderLabels::default()))];
    #[cfg(feature = "html-parser")]
    list.push(Box::new(parse_questions::DomExtractor::new(
        HeaderLabels::default(),
    )));
    list
}

/// 在每个后端上运行并断言结果一致，返回其中一份结果
fn extract_all(markup: &str) -> Vec<QuestionRecord> {
    let mut results = extractors()
        .iter()
        .map(|e| (e.name(), e.extract(markup)))
        .collect::<Vec<_>>();
    let (first_name, first) = results.remove(0);
    for (name, records) in results {
        assert_eq!(first, records, "{} 与 {} 后端结果不一致", first_name, name);
    }
    first
}

fn table(rows: &str) -> String {
    format!("<html><body><table>{}</table></body></html>", rows)
}

const HEADER_ROW: &str = "<tr><td>題號</td><td>答案</td><td>題目</td></tr>";

#[test]
fn test_header_and_single_question() {
    let html = table(&format!(
        "{}<tr><td>1</td><td>2</td><td>題目內容(1)選項一(2)選項二(3)選項三(4)選項四</td></tr>",
        HEADER_ROW
    ));
    let records = extract_all(&html);

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.title, "題目內容");
    assert_eq!(record.options, ["選項一", "選項二", "選項三", "選項四"]);
    assert_eq!(record.answer, "選項二");
}

#[test]
fn test_inline_answer_marker_without_digit_in_answer_cell() {
    let html = table(
        r#"<tr><td>5</td><td>—</td><td>題目內容<span style="color:red;">正確答案為:3</span><br>(1)甲<br>(2)乙<br>(3)丙<br>(4)丁</td></tr>"#,
    );
    let records = extract_all(&html);

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.answer, "丙");
    assert_eq!(record.answer, record.options[2]);
    assert_eq!(record.title, "題目內容");
    assert!(!record.title.contains("正確答案為"));
    assert!(record.options.iter().all(|o| !o.contains("正確答案為")));
}

#[test]
fn test_full_width_colon_marker() {
    let html = table(
        r#"<tr><td>1</td><td>1</td><td>題目<br><span class="ans">正確答案為： 4</span><br>(1)甲(2)乙(3)丙(4)丁</td></tr>"#,
    );
    let records = extract_all(&html);
    assert_eq!(records[0].answer, "丁");
}

#[test]
fn test_header_and_decoration_rows_never_emitted() {
    let html = table(&format!(
        r#"<thead><tr><th>題號</th><th>答案</th><th>題目</th></tr></thead>
        {}
        <tr><td colspan="3">第一章</td></tr>
        <tr><td colspan="1">x</td><td>1</td><td>跨欄(1)a</td></tr>
        <tr><td>1</td><td>1</td></tr>
        <tr><td>1</td><td>答案</td><td>題目</td></tr>
        <tr><td>2</td><td>3</td><td>真正的題目(1)a(2)b(3)c(4)d</td></tr>"#,
        HEADER_ROW
    ));
    let records = extract_all(&html);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].number, "2");
    assert_eq!(records[0].answer, "c");
    for record in &records {
        assert_ne!(record.title, "題目");
    }
}

#[test]
fn test_custom_header_labels() {
    let labels = HeaderLabels::new(["No.", "Answer", "Question"]);
    let html = table(
        "<tr><td>No.</td><td>Answer</td><td>Question</td></tr>\
         <tr><td>1</td><td>1</td><td>Q(1)a(2)b</td></tr>",
    );
    let records = PatternExtractor::new(labels).extract(&html);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].answer, "a");
}

#[test]
fn test_line_fallback_with_five_lines() {
    let html = table("<tr><td>1</td><td>4</td><td>題幹<br>甲<br>乙<br>丙<br>丁</td></tr>");
    let records = extract_all(&html);

    assert_eq!(records[0].title, "題幹");
    assert_eq!(records[0].options, ["甲", "乙", "丙", "丁"]);
    assert_eq!(records[0].answer, "丁");
}

#[test]
fn test_line_fallback_with_block_elements() {
    let html = table(
        "<tr><td>1</td><td>1</td><td><p>題幹</p><p>甲</p><p>乙</p><p>丙</p><p>丁</p></td></tr>",
    );
    let records = extract_all(&html);
    assert_eq!(records[0].title, "題幹");
    assert_eq!(records[0].answer, "甲");
}

#[test]
fn test_too_few_lines_become_title() {
    let html = table("<tr><td>1</td><td>2</td><td>只有題幹<br>沒有選項</td></tr>");
    let records = extract_all(&html);

    assert_eq!(records[0].title, "只有題幹\n沒有選項");
    assert!(records[0].options.iter().all(String::is_empty));
    // 答案编号指向空选项
    assert_eq!(records[0].answer, "");
}

#[test]
fn test_no_answer_anywhere() {
    let html = table("<tr><td>1</td><td>—</td><td>題(1)a(2)b(3)c(4)d</td></tr>");
    let records = extract_all(&html);
    assert_eq!(records[0].answer, "");
}

#[test]
fn test_resolved_answer_matches_option_slot() {
    let html = table(
        "<tr><td>1</td><td>1</td><td>A(1)a(2)b(3)c(4)d</td></tr>\
         <tr><td>2</td><td>2</td><td>B(1)a(3)c</td></tr>\
         <tr><td>3</td><td>(4)</td><td>C(4)d(3)c(2)b(1)a</td></tr>",
    );
    let records = extract_all(&html);

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].answer, records[0].options[0]);
    assert_eq!(records[1].answer, records[1].options[1]);
    assert_eq!(records[1].answer, "");
    assert_eq!(records[2].options, ["a", "b", "c", "d"]);
    assert_eq!(records[2].answer, "d");
}

#[test]
fn test_zero_rows() {
    assert!(extract_all("<p>沒有表格</p>").is_empty());
    assert!(extract_all(&table(HEADER_ROW)).is_empty());
    assert!(extract_all("").is_empty());
}

#[test]
fn test_html5_named_entities_decoded_alike() {
    let html = table(
        "<tr><td>1</td><td>2</td>\
         <td>&ldquo;仁&rdquo;的含義(1)愛人(2)caf&eacute;(3)&hellip;(4)&times;</td></tr>",
    );
    let records = extract_all(&html);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "\u{201c}仁\u{201d}的含義");
    assert_eq!(records[0].options, ["愛人", "café", "…", "×"]);
    assert_eq!(records[0].answer, "café");
}

#[test]
fn test_data_colspan_attribute_keeps_row() {
    let html = table(r#"<tr><td data-colspan="x">1</td><td>1</td><td>Q(1)a(2)b</td></tr>"#);
    let records = extract_all(&html);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].answer, "a");
}

#[test]
fn test_parity_on_realistic_page() {
    let html = r#"<!DOCTYPE html>
<html><head><style>td { color: black; }</style></head>
<body>
<TABLE border="1" class="exam">
  <thead><tr><th>題號</th><th>答案</th><th>題目</th></tr></thead>
  <tbody>
    <tr><td colspan="3" align="center">第一部分　單選題</td></tr>
    <tr>
      <td>1</td>
      <td align="center">3</td>
      <td>下列何者為質數？<br/>(1) 4&nbsp;(2) 6 (3) 7 (4) 9</td>
    </tr>
    <TR>
      <TD>2</TD>
      <TD>&#8212;</TD>
      <TD>
        <p>R &amp; D 部門的主要任務為何？</p>
        <span style="color:red;">正確答案為:1</span>
        <p>(1)研究與發展 (2)&lt;行銷&gt; (3)人事
        (4)財務</p>
      </TD>
    </TR>
    <!-- 隱藏的題目 <tr><td>99</td><td>1</td><td>x(1)y</td></tr> -->
    <tr><td>3</td><td>2</td><td><div>以下哪個是水果</div><div>石頭</div><div>蘋果</div><div>鐵</div><div>木頭</div></td></tr>
  </tbody>
</TABLE>
</body></html>"#;

    let records = extract_all(html);
    assert_eq!(records.len(), 3);

    assert_eq!(records[0].title, "下列何者為質數？");
    assert_eq!(records[0].options, ["4", "6", "7", "9"]);
    assert_eq!(records[0].answer, "7");

    assert_eq!(records[1].title, "R & D 部門的主要任務為何？");
    assert_eq!(records[1].options[1], "<行銷>");
    assert_eq!(records[1].answer, "研究與發展");

    assert_eq!(records[2].title, "以下哪個是水果");
    assert_eq!(records[2].answer, "蘋果");
}

fn write_input(dir: &Path, html: &str) -> std::path::PathBuf {
    let input = dir.join("questions.html");
    fs::write(&input, html).unwrap();
    input
}

fn test_config(dir: &Path) -> Config {
    Config {
        output_dir: dir.join("parsed_questions_csv"),
        parser: Backend::Pattern,
        ..Config::default()
    }
}

#[test]
fn test_app_writes_auto_numbered_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        &table(&format!(
            "{}<tr><td>1</td><td>2</td><td>題目內容(1)選項一(2)選項二(3)選項三(4)選項四</td></tr>",
            HEADER_ROW
        )),
    );
    let app = App::new(test_config(dir.path()));

    let first = app.run(Some(input.as_path()), None).unwrap();
    let second = app.run(Some(input.as_path()), None).unwrap();

    let out_dir = dir.path().join("parsed_questions_csv");
    assert_eq!(
        first,
        RunOutcome::Written {
            path: out_dir.join("1_1.csv"),
            count: 1
        }
    );
    assert_eq!(
        second,
        RunOutcome::Written {
            path: out_dir.join("1_2.csv"),
            count: 1
        }
    );
    assert!(first.status_line().starts_with("✓ 輸出 1 筆到 "));

    let bytes = fs::read(out_dir.join("1_1.csv")).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(
        text,
        "\u{feff}題目|選項1|選項2|選項3|選項4|答案\r\n題目內容|選項一|選項二|選項三|選項四|選項二\r\n"
    );
}

#[test]
fn test_app_explicit_output_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        &table("<tr><td>8</td><td>1</td><td>Q(1)a(2)b</td></tr>"),
    );
    let config = Config {
        format: OutputFormat::Json,
        ..test_config(dir.path())
    };
    let output = dir.path().join("answers.json");

    let outcome = App::new(config).run(Some(input.as_path()), Some(output.as_path())).unwrap();
    assert!(outcome.is_written());

    let records: Vec<QuestionRecord> =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].number, "8");
    assert_eq!(records[0].answer, "a");
    assert!(!dir.path().join("parsed_questions_csv").exists());
}

#[test]
fn test_app_missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let app = App::new(test_config(dir.path()));
    let missing = dir.path().join("nope.html");

    let outcome = app.run(Some(missing.as_path()), None).unwrap();

    assert_eq!(outcome, RunOutcome::MissingInput(missing));
    assert!(outcome.status_line().starts_with("✗ 找不到檔案"));
    assert!(!dir.path().join("parsed_questions_csv").exists());
}

#[test]
fn test_app_no_rows_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), &table(HEADER_ROW));
    let app = App::new(test_config(dir.path()));

    let outcome = app.run(Some(input.as_path()), None).unwrap();

    assert_eq!(outcome, RunOutcome::NoRows(input));
    assert!(outcome.status_line().starts_with("✗ 未解析到任何題目"));
    assert!(!dir.path().join("parsed_questions_csv").exists());
}
