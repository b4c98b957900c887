use pointshare_core::{
    confirm_allocation, encode_submission_payload, AllocationError, AllocationField,
    AllocationPolicy, AllocationState, AuthContext, ChildProfile, Notice, NoticeSink, Page,
    PointShareSession, SessionPhase, SinkError, SinkResult, StepDirection, SubmissionRecord,
    SubmissionSink, Team, Teammate,
};
use std::cell::RefCell;

#[derive(Default)]
struct MockSink {
    calls: RefCell<Vec<(AuthContext, [SubmissionRecord; 2])>>,
    fail_with: Option<SinkError>,
}

impl SubmissionSink for MockSink {
    fn submit_points(&self, auth: &AuthContext, records: &[SubmissionRecord; 2]) -> SinkResult<()> {
        self.calls.borrow_mut().push((auth.clone(), *records));
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
struct MockNotices {
    raised: RefCell<Vec<Notice>>,
}

impl NoticeSink for MockNotices {
    fn notify(&self, notice: &Notice) {
        self.raised.borrow_mut().push(notice.clone());
    }
}

fn teammate(submission_id: i64) -> Teammate {
    Teammate {
        avatar_url: format!("https://cdn.test/avatar/{submission_id}.png"),
        img_url: format!("https://cdn.test/drawing/{submission_id}.png"),
        pages: vec![Page {
            page_url: format!("https://cdn.test/page/{submission_id}-1.png"),
        }],
        submission_id,
    }
}

fn team() -> Team {
    Team {
        child1: teammate(31),
        child2: teammate(32),
    }
}

fn open_session<'a>(
    sink: &'a MockSink,
    notices: &'a MockNotices,
) -> PointShareSession<&'a MockSink, &'a MockNotices> {
    PointShareSession::new(
        AllocationPolicy::default(),
        team(),
        ChildProfile { member_id: 5 },
        AuthContext::authenticated("okta-access-token"),
        sink,
        notices,
    )
}

#[test]
fn confirm_submits_two_records_once_and_becomes_terminal() {
    let sink = MockSink::default();
    let notices = MockNotices::default();
    let mut session = open_session(&sink, &notices);

    session
        .update_field(AllocationField::StoryOne, 30)
        .expect("edit story one");
    session
        .update_field(AllocationField::IllustrationOne, 20)
        .expect("edit illustration one");
    session
        .update_field(AllocationField::StoryTwo, 25)
        .expect("edit story two");
    session
        .update_field(AllocationField::IllustrationTwo, 25)
        .expect("edit illustration two");
    assert_eq!(session.state().remaining(), 0);

    let records = session.confirm().expect("allocation should confirm");

    let calls = sink.calls.borrow();
    assert_eq!(calls.len(), 1);
    let (auth, sent) = &calls[0];
    assert!(auth.is_authenticated);
    assert_eq!(auth.access_token.as_deref(), Some("okta-access-token"));
    assert_eq!(*sent, records);
    assert_eq!(
        records[0],
        SubmissionRecord {
            writing_points: 30,
            drawing_points: 20,
            member_id: 5,
            submission_id: 31,
        }
    );
    assert_eq!(
        records[1],
        SubmissionRecord {
            writing_points: 25,
            drawing_points: 25,
            member_id: 5,
            submission_id: 32,
        }
    );
    assert!(notices.raised.borrow().is_empty());
    assert_eq!(session.phase(), SessionPhase::Submitted);
    assert_eq!(session.state().total(), 0);
    assert_eq!(session.state().remaining(), 100);
}

#[test]
fn submitted_session_rejects_further_input() {
    let sink = MockSink::default();
    let notices = MockNotices::default();
    let mut session = open_session(&sink, &notices);
    session.confirm().expect("empty allocation confirms");

    assert_eq!(
        session.update_field(AllocationField::StoryOne, 10),
        Err(AllocationError::AlreadySubmitted)
    );
    assert_eq!(
        session.nudge(AllocationField::StoryOne, StepDirection::Up),
        Err(AllocationError::AlreadySubmitted)
    );
    assert_eq!(session.confirm(), Err(AllocationError::AlreadySubmitted));
    assert_eq!(sink.calls.borrow().len(), 1);
    assert!(notices.raised.borrow().is_empty());
}

#[test]
fn sink_failure_does_not_change_confirm_outcome() {
    let sink = MockSink {
        fail_with: Some(SinkError::Unavailable("connection refused".to_string())),
        ..MockSink::default()
    };
    let notices = MockNotices::default();
    let mut session = open_session(&sink, &notices);
    session
        .update_field(AllocationField::StoryTwo, 15)
        .expect("edit story two");

    let records = session.confirm().expect("sink failure is not reconciled");

    assert_eq!(records[1].writing_points, 15);
    assert_eq!(sink.calls.borrow().len(), 1);
    assert!(notices.raised.borrow().is_empty());
    assert_eq!(session.phase(), SessionPhase::Submitted);
}

#[test]
fn clamped_edit_reports_accepted_value() {
    let sink = MockSink::default();
    let notices = MockNotices::default();
    let mut session = open_session(&sink, &notices);

    let update = session
        .update_field(AllocationField::StoryOne, 90)
        .expect("edit story one");

    assert_eq!(update.accepted, 70);
    assert_eq!(session.state().story_one(), 70);
    assert_eq!(session.state().remaining(), 10);
}

#[test]
fn nudge_moves_field_by_step() {
    let sink = MockSink::default();
    let notices = MockNotices::default();
    let mut session = open_session(&sink, &notices);

    session
        .nudge(AllocationField::IllustrationTwo, StepDirection::Up)
        .expect("nudge up");
    session
        .nudge(AllocationField::IllustrationTwo, StepDirection::Up)
        .expect("nudge up");

    assert_eq!(session.state().illustration_two(), 10);
    assert_eq!(session.state().remaining(), 90);
}

#[test]
fn reset_discards_edits_and_keeps_session_open() {
    let sink = MockSink::default();
    let notices = MockNotices::default();
    let mut session = open_session(&sink, &notices);
    session
        .update_field(AllocationField::StoryOne, 40)
        .expect("edit story one");

    session.reset();

    assert_eq!(session.state().story_one(), 0);
    assert_eq!(session.state().remaining(), 100);
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(sink.calls.borrow().is_empty());
}

#[test]
fn confirm_allocation_rejects_negative_remaining() {
    let policy = AllocationPolicy::default();
    let state = AllocationState::restore(&policy, 20, 20, 20, 20, -10).expect("valid fields");

    let err = confirm_allocation(&policy, &state, &team(), &ChildProfile { member_id: 5 })
        .expect_err("negative remaining must not produce records");

    assert_eq!(
        err,
        AllocationError::BudgetExceeded {
            remaining: -10,
            budget: 100,
        }
    );
    assert_eq!(err.to_string(), "You may only allocate 100 points!");
}

#[test]
fn payload_uses_backend_field_names() {
    let records = [
        SubmissionRecord {
            writing_points: 40,
            drawing_points: 10,
            member_id: 5,
            submission_id: 31,
        },
        SubmissionRecord {
            writing_points: 30,
            drawing_points: 20,
            member_id: 5,
            submission_id: 32,
        },
    ];

    let payload = encode_submission_payload(&records).expect("payload encodes");
    let json: serde_json::Value = serde_json::from_str(&payload).expect("payload is JSON");

    assert_eq!(
        json,
        serde_json::json!([
            { "WritingPoints": 40, "DrawingPoints": 10, "MemberID": 5, "SubmissionID": 31 },
            { "WritingPoints": 30, "DrawingPoints": 20, "MemberID": 5, "SubmissionID": 32 }
        ])
    );
}
