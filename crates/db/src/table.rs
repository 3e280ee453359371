use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    UserName,
    Password,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Family {
    Table,
    Id,
    Name,
    CreatedBy,
    ActiveMealDate,
    ActiveMealType,
    ActiveUpdatedBy,
    ActiveUpdatedAt,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum FamilyMember {
    Table,
    FamilyId,
    UserId,
    Role,
    DisplayName,
    IsPrimaryToday,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum FamilyMealSetting {
    Table,
    FamilyId,
    Breakfast,
    Lunch,
    Dinner,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum MealCode {
    Table,
    Id,
    Code,
    FamilyId,
    MealDate,
    MealType,
    MealTime,
    ParticipantCount,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Submission {
    Table,
    Id,
    FamilyId,
    UserId,
    Role,
    DisplayName,
    Age,
    MealDate,
    MealType,
    Preferences,
    Drinks,
    Remark,
    ParticipantCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum CookingPreference {
    Table,
    Id,
    FamilyId,
    UserId,
    DisplayName,
    EffectiveDate,
    MealDate,
    MealType,
    Preference,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum Message {
    Table,
    Id,
    UserId,
    MessageType,
    Title,
    Content,
    ActionUrl,
    IsRead,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum WheelCandidate {
    Table,
    Id,
    FamilyId,
    MealDate,
    MealType,
    Name,
    Proposer,
    ProposerName,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum WheelVote {
    Table,
    Id,
    CandidateId,
    UserId,
    FamilyId,
    MealDate,
    MealType,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum WheelPick {
    Table,
    Id,
    FamilyId,
    MealDate,
    MealType,
    WinnerName,
    PickedBy,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Plan {
    Table,
    Id,
    PlanCode,
    FamilyId,
    MealType,
    MealDate,
    SubmissionCnt,
    PlanJson,
    PlanHtml,
    ModelRaw,
    MealCode,
    Comment,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum PlanFeedback {
    Table,
    Id,
    PlanId,
    Feedback,
    CreatedAt,
}
